use crate::models::{Jurisdiction, SourceRecord};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// When rows outside the recognized jurisdictions are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// Keep every row; unrecognized rows get null holiday and demographic fields.
    #[default]
    Off,
    /// Drop unrecognized rows before any derivation, `NewCases` included.
    Pre,
    /// Derive over the full table, then drop unrecognized rows.
    Post,
}

/// Membership test against the recognized country and region codes.
#[derive(Debug, Clone, Default)]
pub struct JurisdictionFilter {
    valid_countries: HashSet<String>,
    valid_regions: HashSet<String>,
}

impl JurisdictionFilter {
    pub fn new<C, R>(valid_countries: C, valid_regions: R) -> Self
    where
        C: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
    {
        Self {
            valid_countries: valid_countries.into_iter().collect(),
            valid_regions: valid_regions.into_iter().collect(),
        }
    }

    /// The row's jurisdiction code, if its level is national or state and the
    /// code belongs to the matching valid set.
    pub fn recognized_code<'a>(&self, record: &'a SourceRecord) -> Option<&'a str> {
        let code = record.jurisdiction_code()?;
        let valid = match record.jurisdiction {
            Jurisdiction::National => &self.valid_countries,
            Jurisdiction::State => &self.valid_regions,
            Jurisdiction::Other(_) => return None,
        };
        valid.contains(code).then_some(code)
    }

    pub fn is_recognized(&self, record: &SourceRecord) -> bool {
        self.recognized_code(record).is_some()
    }

    pub fn retain(&self, mut records: Vec<SourceRecord>) -> Vec<SourceRecord> {
        records.retain(|r| self.is_recognized(r));
        records
    }

    pub fn valid_countries(&self) -> impl Iterator<Item = &str> {
        self.valid_countries.iter().map(String::as_str)
    }

    pub fn valid_regions(&self) -> impl Iterator<Item = &str> {
        self.valid_regions.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(level: &str, country: &str, region: Option<&str>) -> SourceRecord {
        SourceRecord::new(
            NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            Jurisdiction::parse(level),
            Some(country.to_string()),
            region.map(str::to_string),
            None,
            None,
            None,
        )
    }

    fn filter() -> JurisdictionFilter {
        JurisdictionFilter::new(vec!["USA".to_string()], vec!["US_CA".to_string()])
    }

    #[test]
    fn test_recognized_code() {
        let filter = filter();
        assert_eq!(filter.recognized_code(&record("NAT_TOTAL", "USA", None)), Some("USA"));
        assert_eq!(
            filter.recognized_code(&record("STATE_TOTAL", "USA", Some("US_CA"))),
            Some("US_CA")
        );
        assert_eq!(filter.recognized_code(&record("NAT_TOTAL", "GBR", None)), None);
        assert_eq!(
            filter.recognized_code(&record("STATE_TOTAL", "USA", Some("US_TX"))),
            None
        );
    }

    #[test]
    fn test_country_and_region_sets_are_distinct() {
        let filter = filter();
        // A national row is not recognized through the region set
        assert!(!filter.is_recognized(&record("NAT_TOTAL", "US_CA", None)));
        // Nor is an unrecognized level, whatever its codes
        assert!(!filter.is_recognized(&record("CITY_TOTAL", "USA", Some("US_CA"))));
    }

    #[test]
    fn test_retain() {
        let kept = filter().retain(vec![
            record("NAT_TOTAL", "USA", None),
            record("NAT_TOTAL", "GBR", None),
            record("STATE_TOTAL", "USA", Some("US_CA")),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].region_code.as_deref(), Some("US_CA"));
    }
}
