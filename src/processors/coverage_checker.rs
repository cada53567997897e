use crate::models::{Jurisdiction, PopulationTable, SourceTable};
use crate::processors::JurisdictionFilter;
use serde::Serialize;

/// Pre-run check that every recognized code can be looked up, plus a breakdown
/// of the source rows by jurisdiction level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageReport {
    pub missing_countries: Vec<String>,
    pub missing_regions: Vec<String>,
    pub duplicate_codes: Vec<String>,
    pub national_rows: usize,
    pub state_rows: usize,
    pub other_rows: usize,
    pub recognized_rows: usize,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing_countries.is_empty() && self.missing_regions.is_empty()
    }

    pub fn missing_codes(&self) -> Vec<String> {
        self.missing_countries
            .iter()
            .chain(self.missing_regions.iter())
            .cloned()
            .collect()
    }

    pub fn total_rows(&self) -> usize {
        self.national_rows + self.state_rows + self.other_rows
    }
}

pub struct CoverageChecker<'a> {
    filter: &'a JurisdictionFilter,
}

impl<'a> CoverageChecker<'a> {
    pub fn new(filter: &'a JurisdictionFilter) -> Self {
        Self { filter }
    }

    pub fn check(
        &self,
        population: &PopulationTable,
        source: Option<&SourceTable>,
    ) -> CoverageReport {
        let mut report = CoverageReport {
            missing_countries: missing(self.filter.valid_countries(), population),
            missing_regions: missing(self.filter.valid_regions(), population),
            duplicate_codes: population.duplicates().to_vec(),
            ..Default::default()
        };

        if let Some(table) = source {
            for record in &table.records {
                match record.jurisdiction {
                    Jurisdiction::National => report.national_rows += 1,
                    Jurisdiction::State => report.state_rows += 1,
                    Jurisdiction::Other(_) => report.other_rows += 1,
                }
                if self.filter.is_recognized(record) {
                    report.recognized_rows += 1;
                }
            }
        }

        report
    }

    pub fn generate_summary(&self, report: &CoverageReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Coverage Report ===\n");
        summary.push_str(&format!("Source Rows: {}\n", report.total_rows()));
        summary.push_str(&format!("  National: {}\n", report.national_rows));
        summary.push_str(&format!("  State: {}\n", report.state_rows));
        summary.push_str(&format!("  Other: {}\n", report.other_rows));
        summary.push_str(&format!("Recognized Rows: {}\n", report.recognized_rows));
        summary.push_str(&format!(
            "Duplicate Population Codes: {}\n",
            report.duplicate_codes.len()
        ));

        if report.is_complete() {
            summary.push_str("All valid codes have population entries\n");
        } else {
            summary.push_str(&format!(
                "Countries missing from population table: {}\n",
                report.missing_countries.join(", ")
            ));
            summary.push_str(&format!(
                "Regions missing from population table: {}\n",
                report.missing_regions.join(", ")
            ));
        }

        summary
    }
}

fn missing<'c>(codes: impl Iterator<Item = &'c str>, population: &PopulationTable) -> Vec<String> {
    let mut missing: Vec<String> = codes
        .filter(|code| !population.contains(code))
        .map(str::to_string)
        .collect();
    missing.sort();
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PopulationEntry, SourceRecord};
    use chrono::NaiveDate;

    #[test]
    fn test_coverage() {
        let filter = JurisdictionFilter::new(
            vec!["USA".to_string(), "FRA".to_string()],
            vec!["US_CA".to_string(), "US_TX".to_string()],
        );
        let population: PopulationTable = vec![
            PopulationEntry::new("USA".to_string(), Some(1.0), None, None),
            PopulationEntry::new("US_CA".to_string(), Some(1.0), None, None),
        ]
        .into_iter()
        .collect();

        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let source = SourceTable::from_records(vec![
            SourceRecord::new(
                date,
                Jurisdiction::National,
                Some("USA".into()),
                None,
                None,
                None,
                None,
            ),
            SourceRecord::new(
                date,
                Jurisdiction::National,
                Some("GBR".into()),
                None,
                None,
                None,
                None,
            ),
            SourceRecord::new(
                date,
                Jurisdiction::parse("CITY_TOTAL"),
                Some("USA".into()),
                None,
                None,
                None,
                None,
            ),
        ]);

        let checker = CoverageChecker::new(&filter);
        let report = checker.check(&population, Some(&source));

        assert!(!report.is_complete());
        assert_eq!(report.missing_countries, vec!["FRA"]);
        assert_eq!(report.missing_regions, vec!["US_TX"]);
        assert_eq!(report.missing_codes(), vec!["FRA", "US_TX"]);
        assert_eq!(report.national_rows, 2);
        assert_eq!(report.other_rows, 1);
        assert_eq!(report.recognized_rows, 1);
        assert!(checker.generate_summary(&report).contains("US_TX"));
    }
}
