pub mod augmenter;
pub mod case_delta;
pub mod coverage_checker;
pub mod geo_id;
pub mod jurisdiction_filter;

pub use augmenter::{AugmentOptions, AugmentReport, Augmenter, MissingPopulationPolicy};
pub use case_delta::{CaseDelta, DiffMode};
pub use coverage_checker::{CoverageChecker, CoverageReport};
pub use geo_id::geo_id;
pub use jurisdiction_filter::{FilterMode, JurisdictionFilter};
