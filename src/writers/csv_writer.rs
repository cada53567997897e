use crate::error::{ProcessingError, Result};
use crate::models::AugmentedTable;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions, Permissions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Writes an augmented table as delimited text: header row, no index column.
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write to `path`, replacing any existing file. Rows go to a temporary file
    /// in the same directory first, so a failure leaves no partial output.
    pub fn write_table(&self, table: &AugmentedTable, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut staging = NamedTempFile::new_in(dir)?;
        self.write_to(table, staging.as_file_mut())?;
        staging
            .as_file()
            .set_permissions(output_permissions(path)?)?;
        staging
            .persist(path)
            .map_err(|e| ProcessingError::Io(e.error))?;

        info!(path = %path.display(), rows = table.len(), "Wrote augmented table");
        Ok(())
    }

    pub fn write_to<W: Write>(&self, table: &AugmentedTable, output: W) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(output);

        let layout = table.layout();
        writer.write_record(&layout.headers)?;
        for record in &table.records {
            writer.write_record(table.render_row(&layout, record))?;
        }
        writer.flush()?;

        Ok(())
    }
}

/// Permissions the output should end up with: those of the file being replaced,
/// or of a freshly created file (subject to the umask) when there is none.
/// Staging files are owner-only, so they are applied before the rename.
fn output_permissions(path: &Path) -> Result<Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Ok(metadata.permissions());
    }
    let created = OpenOptions::new().write(true).create(true).open(path)?;
    Ok(created.metadata()?.permissions())
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
