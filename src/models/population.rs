use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PopulationEntry {
    #[validate(length(min = 1))]
    pub code: String,

    #[validate(range(min = 0.0))]
    pub pop_2020: Option<f64>,

    #[validate(range(min = 0.0))]
    pub area_km2: Option<f64>,

    #[validate(range(min = 0.0))]
    pub density_perkm2: Option<f64>,
}

impl PopulationEntry {
    pub fn new(
        code: String,
        pop_2020: Option<f64>,
        area_km2: Option<f64>,
        density_perkm2: Option<f64>,
    ) -> Self {
        Self {
            code,
            pop_2020,
            area_km2,
            density_perkm2,
        }
    }
}

/// Population reference keyed by jurisdiction code. The first entry for a
/// code wins.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    entries: HashMap<String, PopulationEntry>,
    duplicates: Vec<String>,
}

impl PopulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the code is already present. Returns `false` for a
    /// duplicate, which is remembered for reporting.
    pub fn insert(&mut self, entry: PopulationEntry) -> bool {
        if self.entries.contains_key(&entry.code) {
            self.duplicates.push(entry.code);
            return false;
        }
        self.entries.insert(entry.code.clone(), entry);
        true
    }

    pub fn get(&self, code: &str) -> Option<&PopulationEntry> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PopulationEntry> for PopulationTable {
    fn from_iter<I: IntoIterator<Item = PopulationEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_validation() {
        let entry = PopulationEntry::new(
            "USA".to_string(),
            Some(331_000_000.0),
            Some(9_834_000.0),
            Some(33.6),
        );
        assert!(entry.validate().is_ok());

        let negative = PopulationEntry::new("USA".to_string(), Some(-1.0), None, None);
        assert!(negative.validate().is_err());

        let blank = PopulationEntry::new(String::new(), None, None, None);
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_first_entry_wins() {
        let table: PopulationTable = vec![
            PopulationEntry::new("GBR".to_string(), Some(67.0), None, None),
            PopulationEntry::new("GBR".to_string(), Some(1.0), None, None),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("GBR").unwrap().pop_2020, Some(67.0));
        assert_eq!(table.duplicates(), ["GBR".to_string()]);
        assert!(table.get("FRA").is_none());
    }
}
