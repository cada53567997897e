pub mod constants;
pub mod number;
pub mod progress;

pub use constants::*;
pub use number::{
    format_number, non_empty, parse_compact_date, parse_optional_number, parse_table_date,
};
pub use progress::ProgressReporter;
