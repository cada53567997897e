use crate::error::{ProcessingError, Result};
use crate::holidays::HolidayOracle;
use crate::models::{
    AugmentedRecord, AugmentedTable, DerivedFields, PopulationTable, SourceRecord, SourceTable,
};
use crate::processors::case_delta::{CaseDelta, DiffMode};
use crate::processors::geo_id::geo_id;
use crate::processors::jurisdiction_filter::{FilterMode, JurisdictionFilter};
use crate::utils::constants::{DEFAULT_REGION_PLACEHOLDER, ORACLE_DATE_FORMAT};
use crate::utils::progress::ProgressReporter;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What to do with a recognized code that has no population entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPopulationPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Keep the row with null demographics; the holiday indicator is kept.
    Null,
    /// Drop the row from the output.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentOptions {
    pub include_demographics: bool,
    pub filter: FilterMode,
    pub new_cases: DiffMode,
    pub on_missing_population: MissingPopulationPolicy,
    pub region_placeholder: String,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            include_demographics: true,
            filter: FilterMode::Off,
            new_cases: DiffMode::Global,
            on_missing_population: MissingPopulationPolicy::Abort,
            region_placeholder: DEFAULT_REGION_PLACEHOLDER.to_string(),
        }
    }
}

/// Row counts gathered during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AugmentReport {
    pub input_rows: usize,
    pub output_rows: usize,
    pub recognized_rows: usize,
    pub unrecognized_rows: usize,
    pub filtered_rows: usize,
    pub population_misses: usize,
    pub skipped_rows: usize,
    pub holiday_rows: usize,
}

impl AugmentReport {
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Augmentation Report ===\n");
        summary.push_str(&format!("Input Rows: {}\n", self.input_rows));
        summary.push_str(&format!("Output Rows: {}\n", self.output_rows));
        summary.push_str(&format!("Recognized Jurisdictions: {}\n", self.recognized_rows));
        summary.push_str(&format!(
            "Unrecognized (null derived fields): {}\n",
            self.unrecognized_rows
        ));
        summary.push_str(&format!("Filtered Out: {}\n", self.filtered_rows));
        summary.push_str(&format!("Holiday Rows: {}\n", self.holiday_rows));

        if self.population_misses > 0 {
            summary.push_str(&format!(
                "Population Misses: {} ({} rows skipped)\n",
                self.population_misses, self.skipped_rows
            ));
        }

        summary
    }
}

enum Derivation {
    Recognized(DerivedFields),
    Unrecognized,
    Skipped,
}

/// Adds `NewCases`, `GeoID`, `Holidays` and, optionally, population, area and
/// density to every row of a source table.
pub struct Augmenter<'a> {
    oracle: &'a dyn HolidayOracle,
    population: Option<&'a PopulationTable>,
    filter: JurisdictionFilter,
    options: AugmentOptions,
}

impl<'a> Augmenter<'a> {
    pub fn new(oracle: &'a dyn HolidayOracle, filter: JurisdictionFilter) -> Self {
        Self {
            oracle,
            population: None,
            filter,
            options: AugmentOptions::default(),
        }
    }

    pub fn with_population(mut self, population: &'a PopulationTable) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_options(mut self, options: AugmentOptions) -> Self {
        self.options = options;
        self
    }

    pub fn augment(
        &self,
        table: SourceTable,
        progress: Option<&ProgressReporter>,
    ) -> Result<(AugmentedTable, AugmentReport)> {
        if self.options.include_demographics && self.population.is_none() {
            return Err(ProcessingError::Config(
                "Demographic columns requested without a population table".to_string(),
            ));
        }

        let SourceTable { headers, records } = table;
        let mut report = AugmentReport {
            input_rows: records.len(),
            ..Default::default()
        };

        let records = if self.options.filter == FilterMode::Pre {
            let kept = self.filter.retain(records);
            report.filtered_rows = report.input_rows - kept.len();
            debug!(kept = kept.len(), dropped = report.filtered_rows, "Pre-filtered rows");
            kept
        } else {
            records
        };

        let new_cases = CaseDelta::new(self.options.new_cases).compute(&records);

        if let Some(p) = progress {
            p.set_length(records.len() as u64);
            p.set_message("Deriving holidays and demographics...");
        }

        let mut augmented = Vec::with_capacity(records.len());
        for (record, new_cases) in records.into_iter().zip(new_cases) {
            if let Some(p) = progress {
                p.increment(1);
            }

            let derived = match self.derive(&record, &mut report)? {
                Derivation::Recognized(fields) => {
                    report.recognized_rows += 1;
                    fields
                }
                Derivation::Unrecognized if self.options.filter == FilterMode::Post => {
                    report.filtered_rows += 1;
                    continue;
                }
                Derivation::Unrecognized => {
                    report.unrecognized_rows += 1;
                    DerivedFields::default()
                }
                Derivation::Skipped => {
                    report.skipped_rows += 1;
                    continue;
                }
            };

            if derived.holiday.is_some_and(|h| h.is_holiday()) {
                report.holiday_rows += 1;
            }

            let geo_id = geo_id(
                record.country_name.as_deref(),
                record.region_name.as_deref(),
                &self.options.region_placeholder,
            );

            augmented.push(AugmentedRecord {
                source: record,
                new_cases,
                geo_id,
                derived,
            });
        }

        report.output_rows = augmented.len();
        if report.population_misses > 0 {
            warn!(
                misses = report.population_misses,
                policy = ?self.options.on_missing_population,
                "Recognized codes without population entries"
            );
        }
        info!(
            input = report.input_rows,
            output = report.output_rows,
            recognized = report.recognized_rows,
            "Augmentation complete"
        );

        let table = AugmentedTable::new(headers, self.options.include_demographics, augmented);
        Ok((table, report))
    }

    fn derive(&self, record: &SourceRecord, report: &mut AugmentReport) -> Result<Derivation> {
        let Some(code) = self.filter.recognized_code(record) else {
            return Ok(Derivation::Unrecognized);
        };

        let mut fields = DerivedFields::default();

        if self.options.include_demographics {
            match self.population.and_then(|p| p.get(code)) {
                Some(entry) => {
                    fields.pop_2020 = entry.pop_2020;
                    fields.area_km2 = entry.area_km2;
                    fields.density_perkm2 = entry.density_perkm2;
                }
                None => {
                    report.population_misses += 1;
                    match self.options.on_missing_population {
                        MissingPopulationPolicy::Abort => {
                            return Err(ProcessingError::PopulationNotFound {
                                code: code.to_string(),
                            })
                        }
                        MissingPopulationPolicy::Null => {
                            debug!(
                                code,
                                date = %record.date,
                                "No population entry; leaving demographics null"
                            );
                        }
                        MissingPopulationPolicy::Skip => {
                            debug!(code, date = %record.date, "No population entry; skipping row");
                            return Ok(Derivation::Skipped);
                        }
                    }
                }
            }
        }

        let date = record.date.format(ORACLE_DATE_FORMAT).to_string();
        fields.holiday = Some(self.oracle.holiday_area(code, &date)?);

        Ok(Derivation::Recognized(fields))
    }
}
