use crate::error::{ProcessingError, Result};
use crate::models::{PopulationEntry, PopulationTable};
use crate::readers::column_index;
use crate::utils::constants::{COL_CODE, POPULATION_VALUE_COLUMNS};
use crate::utils::parse_optional_number;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};
use validator::Validate;

const TABLE: &str = "population table";

/// Reads the population reference: a `Code` column plus population, area and
/// density in the third to fifth columns.
pub struct PopulationReader {
    delimiter: u8,
}

impl PopulationReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_table(&self, path: &Path) -> Result<PopulationTable> {
        let file = File::open(path)?;
        let table = self.read_from(file)?;
        debug!(path = %path.display(), codes = table.len(), "Read population table");
        Ok(table)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<PopulationTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let code_column = column_index(&headers, COL_CODE, TABLE)?;
        let required_width = POPULATION_VALUE_COLUMNS[2] + 1;
        if headers.len() < required_width {
            return Err(ProcessingError::InvalidFormat(format!(
                "Population table needs at least {} columns, found {}",
                required_width,
                headers.len()
            )));
        }

        let mut table = PopulationTable::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let entry = self.parse_entry(&record, code_column, index + 1)?;

            // Rows without a code can never match a lookup
            let Some(entry) = entry else { continue };
            let code = entry.code.clone();
            if !table.insert(entry) {
                warn!(
                    code = %code,
                    row = index + 1,
                    "Duplicate population code; keeping first entry"
                );
            }
        }

        Ok(table)
    }

    fn parse_entry(
        &self,
        record: &StringRecord,
        code_column: usize,
        row: usize,
    ) -> Result<Option<PopulationEntry>> {
        let code = record.get(code_column).unwrap_or("").trim();
        if code.is_empty() {
            return Ok(None);
        }

        let value = |position: usize| -> Result<Option<f64>> {
            let raw = record.get(position).unwrap_or("");
            parse_optional_number(raw).transpose().map_err(|_| {
                ProcessingError::InvalidFormat(format!(
                    "Invalid population value '{}' for {} at row {}",
                    raw, code, row
                ))
            })
        };

        let [pop_column, area_column, density_column] = POPULATION_VALUE_COLUMNS;
        let entry = PopulationEntry::new(
            code.to_string(),
            value(pop_column)?,
            value(area_column)?,
            value(density_column)?,
        );
        entry.validate()?;

        Ok(Some(entry))
    }
}

impl Default for PopulationReader {
    fn default() -> Self {
        Self::new()
    }
}
