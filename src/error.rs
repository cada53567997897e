use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    #[error("Invalid date '{value}' at row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Code {code} is a valid jurisdiction but has no population entry")]
    PopulationNotFound { code: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{count} valid code(s) missing from the population table: {codes}")]
    MissingCodes { count: usize, codes: String },
}
