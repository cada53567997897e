use serde::{Deserialize, Serialize};

use crate::models::{HolidayIndicator, SourceRecord};
use crate::utils::format_number;

/// Columns the augmenter adds to the source table, in append order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedColumn {
    NewCases,
    GeoId,
    Holidays,
    Pop2020,
    AreaKm2,
    DensityPerKm2,
}

impl DerivedColumn {
    pub const BASE: [DerivedColumn; 3] = [
        DerivedColumn::NewCases,
        DerivedColumn::GeoId,
        DerivedColumn::Holidays,
    ];

    pub const DEMOGRAPHIC: [DerivedColumn; 3] = [
        DerivedColumn::Pop2020,
        DerivedColumn::AreaKm2,
        DerivedColumn::DensityPerKm2,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            DerivedColumn::NewCases => "NewCases",
            DerivedColumn::GeoId => "GeoID",
            DerivedColumn::Holidays => "Holidays",
            DerivedColumn::Pop2020 => "pop_2020",
            DerivedColumn::AreaKm2 => "area_km2",
            DerivedColumn::DensityPerKm2 => "density_perkm2",
        }
    }

    pub fn columns(include_demographics: bool) -> Vec<DerivedColumn> {
        let mut columns = Self::BASE.to_vec();
        if include_demographics {
            columns.extend(Self::DEMOGRAPHIC);
        }
        columns
    }
}

/// Lookup results for one row. All `None` means the row's jurisdiction was not
/// recognized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    pub holiday: Option<HolidayIndicator>,
    pub pop_2020: Option<f64>,
    pub area_km2: Option<f64>,
    pub density_perkm2: Option<f64>,
}

impl DerivedFields {
    pub fn is_null(&self) -> bool {
        self.holiday.is_none()
            && self.pop_2020.is_none()
            && self.area_km2.is_none()
            && self.density_perkm2.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedRecord {
    pub source: SourceRecord,
    pub new_cases: f64,
    pub geo_id: Option<String>,
    pub derived: DerivedFields,
}

impl AugmentedRecord {
    /// Rendered cell for a derived column; nulls render empty.
    pub fn value(&self, column: DerivedColumn) -> String {
        match column {
            DerivedColumn::NewCases => format_number(self.new_cases),
            DerivedColumn::GeoId => self.geo_id.clone().unwrap_or_default(),
            DerivedColumn::Holidays => self
                .derived
                .holiday
                .map(|h| h.as_flag().to_string())
                .unwrap_or_default(),
            DerivedColumn::Pop2020 => render(self.derived.pop_2020),
            DerivedColumn::AreaKm2 => render(self.derived.area_km2),
            DerivedColumn::DensityPerKm2 => render(self.derived.density_perkm2),
        }
    }
}

fn render(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// Where each derived column lands in the output row.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    pub headers: Vec<String>,
    pub slots: Vec<(DerivedColumn, usize)>,
}

#[derive(Debug, Clone, Default)]
pub struct AugmentedTable {
    pub source_headers: Vec<String>,
    pub include_demographics: bool,
    pub records: Vec<AugmentedRecord>,
}

impl AugmentedTable {
    pub fn new(
        source_headers: Vec<String>,
        include_demographics: bool,
        records: Vec<AugmentedRecord>,
    ) -> Self {
        Self {
            source_headers,
            include_demographics,
            records,
        }
    }

    /// Derived columns replace a same-named source column in place and are
    /// appended otherwise.
    pub fn layout(&self) -> OutputLayout {
        let mut headers = self.source_headers.clone();
        let mut slots = Vec::new();

        for column in DerivedColumn::columns(self.include_demographics) {
            let index = match headers.iter().position(|h| h == column.header()) {
                Some(existing) => existing,
                None => {
                    headers.push(column.header().to_string());
                    headers.len() - 1
                }
            };
            slots.push((column, index));
        }

        OutputLayout { headers, slots }
    }

    pub fn render_row(&self, layout: &OutputLayout, record: &AugmentedRecord) -> Vec<String> {
        let mut row = record.source.fields.clone();
        row.resize(layout.headers.len(), String::new());
        for (column, index) in &layout.slots {
            row[*index] = record.value(*column);
        }
        row
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Jurisdiction;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn augmented(derived: DerivedFields) -> AugmentedRecord {
        AugmentedRecord {
            source: SourceRecord::new(
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                Jurisdiction::National,
                Some("USA".to_string()),
                None,
                Some("United States".to_string()),
                None,
                Some(10.0),
            ),
            new_cases: 0.0,
            geo_id: Some("United States__nan".to_string()),
            derived,
        }
    }

    #[test]
    fn test_layout_appends_in_order() {
        let table = AugmentedTable::new(vec!["Date".to_string()], true, vec![]);
        let layout = table.layout();
        assert_eq!(
            layout.headers,
            vec![
                "Date",
                "NewCases",
                "GeoID",
                "Holidays",
                "pop_2020",
                "area_km2",
                "density_perkm2"
            ]
        );

        let table = AugmentedTable::new(vec!["Date".to_string()], false, vec![]);
        assert_eq!(table.layout().headers, vec!["Date", "NewCases", "GeoID", "Holidays"]);
    }

    #[test]
    fn test_layout_replaces_existing_column() {
        let headers = vec![
            "Date".to_string(),
            "Holidays".to_string(),
            "CountryName".to_string(),
        ];
        let table = AugmentedTable::new(headers, false, vec![]);
        let layout = table.layout();

        assert_eq!(
            layout.headers,
            vec!["Date", "Holidays", "CountryName", "NewCases", "GeoID"]
        );
        assert!(layout.slots.contains(&(DerivedColumn::Holidays, 1)));
    }

    #[test]
    fn test_render_row_nulls_are_empty() {
        let record = augmented(DerivedFields::default());
        let table = AugmentedTable::new(
            crate::utils::constants::REQUIRED_SOURCE_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            true,
            vec![record.clone()],
        );
        let layout = table.layout();
        let row = table.render_row(&layout, &record);

        assert_eq!(row.len(), 13);
        assert_eq!(&row[7..], ["0", "United States__nan", "", "", "", ""]);
    }

    #[test]
    fn test_value_rendering() {
        let record = augmented(DerivedFields {
            holiday: Some(HolidayIndicator::Holiday),
            pop_2020: Some(331_000_000.0),
            area_km2: Some(9_834_000.0),
            density_perkm2: Some(33.6),
        });

        assert_eq!(record.value(DerivedColumn::Holidays), "1");
        assert_eq!(record.value(DerivedColumn::Pop2020), "331000000");
        assert_eq!(record.value(DerivedColumn::DensityPerKm2), "33.6");
        assert!(!record.derived.is_null());
    }
}
