pub mod augmented;
pub mod holiday;
pub mod jurisdiction;
pub mod population;
pub mod source;

pub use augmented::{AugmentedRecord, AugmentedTable, DerivedColumn, DerivedFields, OutputLayout};
pub use holiday::HolidayIndicator;
pub use jurisdiction::Jurisdiction;
pub use population::{PopulationEntry, PopulationTable};
pub use source::{SourceRecord, SourceTable};
