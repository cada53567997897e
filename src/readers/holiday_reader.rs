use crate::error::{ProcessingError, Result};
use crate::readers::column_index;
use crate::utils::constants::{COL_CODE, COL_HOLIDAY_DATE};
use crate::utils::parse_table_date;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const TABLE: &str = "holiday calendar";

/// Reads a holiday calendar: one row per (Code, Date) holiday. Extra columns
/// such as a holiday name are ignored.
pub struct HolidayReader {
    delimiter: u8,
}

impl HolidayReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_holidays(&self, path: &Path) -> Result<Vec<(String, NaiveDate)>> {
        let file = File::open(path)?;
        let holidays = self.read_from(file)?;
        debug!(path = %path.display(), holidays = holidays.len(), "Read holiday calendar");
        Ok(holidays)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<Vec<(String, NaiveDate)>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let code_column = column_index(&headers, COL_CODE, TABLE)?;
        let date_column = column_index(&headers, COL_HOLIDAY_DATE, TABLE)?;

        let mut holidays = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let code = record.get(code_column).unwrap_or("").trim();
            if code.is_empty() {
                continue;
            }

            let raw_date = record.get(date_column).unwrap_or("");
            let date = parse_table_date(raw_date).ok_or_else(|| ProcessingError::InvalidDate {
                row: index + 1,
                value: raw_date.to_string(),
            })?;

            holidays.push((code.to_string(), date));
        }

        Ok(holidays)
    }
}

impl Default for HolidayReader {
    fn default() -> Self {
        Self::new()
    }
}
