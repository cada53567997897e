use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Jurisdiction;
use crate::utils::constants::{REQUIRED_SOURCE_COLUMNS, SOURCE_DATE_FORMAT};
use crate::utils::format_number;

/// One (entity, date) row of the policy-tracking table.
///
/// The essential columns are parsed; `fields` keeps every raw value in header
/// order so native columns pass through to the output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub date: NaiveDate,
    pub jurisdiction: Jurisdiction,
    pub country_code: Option<String>,
    pub region_code: Option<String>,
    pub country_name: Option<String>,
    pub region_name: Option<String>,
    pub confirmed_cases: Option<f64>,
    pub fields: Vec<String>,
}

impl SourceRecord {
    /// Build a record holding only the essential columns, laid out as
    /// `REQUIRED_SOURCE_COLUMNS`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        jurisdiction: Jurisdiction,
        country_code: Option<String>,
        region_code: Option<String>,
        country_name: Option<String>,
        region_name: Option<String>,
        confirmed_cases: Option<f64>,
    ) -> Self {
        let fields = vec![
            date.format(SOURCE_DATE_FORMAT).to_string(),
            jurisdiction.as_str().to_string(),
            country_code.clone().unwrap_or_default(),
            region_code.clone().unwrap_or_default(),
            country_name.clone().unwrap_or_default(),
            region_name.clone().unwrap_or_default(),
            confirmed_cases.map(format_number).unwrap_or_default(),
        ];

        Self {
            date,
            jurisdiction,
            country_code,
            region_code,
            country_name,
            region_name,
            confirmed_cases,
            fields,
        }
    }

    /// The code that identifies this row's jurisdiction: `CountryCode` for
    /// national rows, `RegionCode` for state rows, nothing otherwise.
    pub fn jurisdiction_code(&self) -> Option<&str> {
        match self.jurisdiction {
            Jurisdiction::National => self.country_code.as_deref(),
            Jurisdiction::State => self.region_code.as_deref(),
            Jurisdiction::Other(_) => None,
        }
    }

    pub fn entity_key(&self) -> (Option<&str>, Option<&str>) {
        (self.country_code.as_deref(), self.region_code.as_deref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub records: Vec<SourceRecord>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, records: Vec<SourceRecord>) -> Self {
        Self { headers, records }
    }

    /// Table whose header is exactly the essential columns, for records built
    /// with [`SourceRecord::new`].
    pub fn from_records(records: Vec<SourceRecord>) -> Self {
        let headers = REQUIRED_SOURCE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect();
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
