pub mod holiday_reader;
pub mod population_reader;
pub mod source_reader;

pub use holiday_reader::HolidayReader;
pub use population_reader::PopulationReader;
pub use source_reader::SourceReader;

use crate::error::{ProcessingError, Result};
use csv::StringRecord;

/// Position of a named column in a header row.
pub(crate) fn column_index(headers: &StringRecord, column: &str, table: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| ProcessingError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
}
