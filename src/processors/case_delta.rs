use crate::models::SourceRecord;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How `NewCases` differences are taken across the row sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DiffMode {
    /// Difference against the previous row of the whole table, regardless of
    /// entity. Entity boundaries yield cross-entity deltas.
    #[default]
    Global,
    /// Difference against the previous row of the same (CountryCode,
    /// RegionCode) entity.
    PerEntity,
}

/// Daily new cases from cumulative `ConfirmedCases`.
///
/// A difference with no predecessor, or involving a blank count, is zero.
pub struct CaseDelta {
    mode: DiffMode,
}

impl CaseDelta {
    pub fn new(mode: DiffMode) -> Self {
        Self { mode }
    }

    pub fn compute(&self, records: &[SourceRecord]) -> Vec<f64> {
        match self.mode {
            DiffMode::Global => Self::global(records),
            DiffMode::PerEntity => Self::per_entity(records),
        }
    }

    fn global(records: &[SourceRecord]) -> Vec<f64> {
        let mut deltas = Vec::with_capacity(records.len());
        let mut previous: Option<Option<f64>> = None;

        for record in records {
            deltas.push(delta(previous.flatten(), record.confirmed_cases));
            previous = Some(record.confirmed_cases);
        }

        deltas
    }

    fn per_entity(records: &[SourceRecord]) -> Vec<f64> {
        let mut last_seen: HashMap<(Option<&str>, Option<&str>), Option<f64>> = HashMap::new();

        records
            .iter()
            .map(|record| {
                let previous = last_seen
                    .insert(record.entity_key(), record.confirmed_cases)
                    .flatten();
                delta(previous, record.confirmed_cases)
            })
            .collect()
    }
}

fn delta(previous: Option<f64>, current: Option<f64>) -> f64 {
    match (previous, current) {
        (Some(previous), Some(current)) => current - previous,
        _ => 0.0,
    }
}
