use crate::error::Result;
use crate::models::DerivedColumn;
use crate::utils::constants::{COL_DATE, SOURCE_DATE_FORMAT};
use crate::utils::parse_table_date;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct OutputSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub unique_geo_ids: usize,
    pub holiday_rows: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Null count per derived column present in the file
    pub null_counts: BTreeMap<String, usize>,
}

impl OutputSummary {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Augmented Output ===\n");
        summary.push_str(&format!("Rows: {}\n", self.total_rows));
        summary.push_str(&format!("Columns: {}\n", self.total_columns));
        summary.push_str(&format!("Unique GeoIDs: {}\n", self.unique_geo_ids));
        summary.push_str(&format!("Holiday Rows: {}\n", self.holiday_rows));
        if let Some((first, last)) = self.date_range {
            summary.push_str(&format!(
                "Date Range: {} to {}\n",
                first.format(SOURCE_DATE_FORMAT),
                last.format(SOURCE_DATE_FORMAT)
            ));
        }

        summary.push_str("\nNull Values:\n");
        for (column, nulls) in &self.null_counts {
            let percentage = if self.total_rows == 0 {
                0.0
            } else {
                100.0 * *nulls as f64 / self.total_rows as f64
            };
            summary.push_str(&format!("  {}: {} ({:.1}%)\n", column, nulls, percentage));
        }

        summary
    }
}

/// Summarizes a written augmented table.
pub struct OutputAnalyzer {
    delimiter: u8,
}

impl OutputAnalyzer {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn analyze(&self, path: &Path) -> Result<OutputSummary> {
        self.analyze_from(File::open(path)?)
    }

    pub fn analyze_from<R: Read>(&self, input: R) -> Result<OutputSummary> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(input);
        let headers = reader.headers()?.clone();

        let derived: Vec<(String, usize)> = DerivedColumn::columns(true)
            .into_iter()
            .filter_map(|column| {
                headers
                    .iter()
                    .position(|h| h == column.header())
                    .map(|index| (column.header().to_string(), index))
            })
            .collect();
        let geo_column = headers.iter().position(|h| h == DerivedColumn::GeoId.header());
        let holiday_column = headers.iter().position(|h| h == DerivedColumn::Holidays.header());
        let date_column = headers.iter().position(|h| h == COL_DATE);

        let mut null_counts: BTreeMap<String, usize> =
            derived.iter().map(|(name, _)| (name.clone(), 0)).collect();
        let mut geo_ids = HashSet::new();
        let mut holiday_rows = 0;
        let mut date_range: Option<(NaiveDate, NaiveDate)> = None;
        let mut total_rows = 0;

        for result in reader.records() {
            let record = result?;
            total_rows += 1;

            for (name, index) in &derived {
                if record.get(*index).map_or(true, |v| v.is_empty()) {
                    *null_counts.entry(name.clone()).or_default() += 1;
                }
            }

            if let Some(geo_id) = geo_column.and_then(|i| record.get(i)) {
                if !geo_id.is_empty() {
                    geo_ids.insert(geo_id.to_string());
                }
            }

            if holiday_column.and_then(|i| record.get(i)) == Some("1") {
                holiday_rows += 1;
            }

            if let Some(date) = date_column.and_then(|i| record.get(i)).and_then(parse_table_date) {
                date_range = Some(match date_range {
                    Some((first, last)) => (first.min(date), last.max(date)),
                    None => (date, date),
                });
            }
        }

        Ok(OutputSummary {
            total_rows,
            total_columns: headers.len(),
            unique_geo_ids: geo_ids.len(),
            holiday_rows,
            date_range,
            null_counts,
        })
    }
}

impl Default for OutputAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
