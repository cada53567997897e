use crate::error::{ProcessingError, Result};
use crate::models::{Jurisdiction, SourceRecord, SourceTable};
use crate::readers::column_index;
use crate::utils::constants::*;
use crate::utils::{non_empty, parse_optional_number, parse_table_date};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const TABLE: &str = "source table";

/// Column positions of the essential fields within a source header.
struct SourceColumns {
    date: usize,
    jurisdiction: usize,
    country_code: usize,
    region_code: usize,
    country_name: usize,
    region_name: usize,
    confirmed_cases: usize,
}

impl SourceColumns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            date: column_index(headers, COL_DATE, TABLE)?,
            jurisdiction: column_index(headers, COL_JURISDICTION, TABLE)?,
            country_code: column_index(headers, COL_COUNTRY_CODE, TABLE)?,
            region_code: column_index(headers, COL_REGION_CODE, TABLE)?,
            country_name: column_index(headers, COL_COUNTRY_NAME, TABLE)?,
            region_name: column_index(headers, COL_REGION_NAME, TABLE)?,
            confirmed_cases: column_index(headers, COL_CONFIRMED_CASES, TABLE)?,
        })
    }
}

pub struct SourceReader {
    delimiter: u8,
}

impl SourceReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read the whole policy-tracking table into memory
    pub fn read_table(&self, path: &Path) -> Result<SourceTable> {
        let file = File::open(path)?;
        let table = self.read_from(file)?;
        debug!(path = %path.display(), rows = table.len(), "Read source table");
        Ok(table)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<SourceTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(input);

        let header_record = reader.headers()?.clone();
        let columns = SourceColumns::resolve(&header_record)?;
        let headers = header_record.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            records.push(self.parse_record(&record, &columns, index + 1)?);
        }

        Ok(SourceTable::new(headers, records))
    }

    /// Parse one data row; `row` is 1-based and excludes the header
    fn parse_record(
        &self,
        record: &StringRecord,
        columns: &SourceColumns,
        row: usize,
    ) -> Result<SourceRecord> {
        let field = |index: usize| record.get(index).unwrap_or("");

        let raw_date = field(columns.date);
        let date = parse_table_date(raw_date).ok_or_else(|| ProcessingError::InvalidDate {
            row,
            value: raw_date.to_string(),
        })?;

        let raw_cases = field(columns.confirmed_cases);
        let confirmed_cases = parse_optional_number(raw_cases)
            .transpose()
            .map_err(|_| {
                ProcessingError::InvalidFormat(format!(
                    "Invalid {} '{}' at row {}",
                    COL_CONFIRMED_CASES, raw_cases, row
                ))
            })?;

        Ok(SourceRecord {
            date,
            jurisdiction: Jurisdiction::parse(field(columns.jurisdiction)),
            country_code: non_empty(field(columns.country_code)),
            region_code: non_empty(field(columns.region_code)),
            country_name: non_empty(field(columns.country_name)),
            region_name: non_empty(field(columns.region_name)),
            confirmed_cases,
            fields: record.iter().map(str::to_string).collect(),
        })
    }
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "CountryName,CountryCode,RegionName,RegionCode,Jurisdiction,Date,C1_School closing,ConfirmedCases";

    #[test]
    fn test_read_source_table() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(temp_file, "Aruba,ABW,,,NAT_TOTAL,20200101,0.00,")?;
        writeln!(temp_file, "Brazil,BRA,Acre,BR_AC,STATE_TOTAL,20200102,1.00,15")?;

        let table = SourceReader::new().read_table(temp_file.path())?;

        assert_eq!(table.headers.len(), 8);
        assert_eq!(table.len(), 2);

        let aruba = &table.records[0];
        assert_eq!(aruba.jurisdiction, Jurisdiction::National);
        assert_eq!(aruba.country_code.as_deref(), Some("ABW"));
        assert_eq!(aruba.region_name, None);
        assert_eq!(aruba.confirmed_cases, None);
        assert_eq!(aruba.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());

        let acre = &table.records[1];
        assert_eq!(acre.jurisdiction, Jurisdiction::State);
        assert_eq!(acre.jurisdiction_code(), Some("BR_AC"));
        assert_eq!(acre.confirmed_cases, Some(15.0));
        assert_eq!(acre.fields[6], "1.00");

        Ok(())
    }

    #[test]
    fn test_iso_dates_and_delimiter() -> Result<()> {
        let data = "Date;Jurisdiction;CountryCode;RegionCode;CountryName;RegionName;ConfirmedCases\n\
                    2020-04-05;NAT_TOTAL;USA;;United States;;10\n";

        let table = SourceReader::with_delimiter(b';').read_from(data.as_bytes())?;
        assert_eq!(
            table.records[0].date,
            NaiveDate::from_ymd_opt(2020, 4, 5).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let data = "Date,Jurisdiction,CountryCode,RegionCode,CountryName,RegionName,ConfirmedCases\n\
                    20200101,NAT_TOTAL,USA,,United States,,10\n\
                    2020011,NAT_TOTAL,USA,,United States,,11\n";

        match SourceReader::new().read_from(data.as_bytes()) {
            Err(ProcessingError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2020011");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_short_iso_date_is_fatal() {
        let data = "Date,Jurisdiction,CountryCode,RegionCode,CountryName,RegionName,ConfirmedCases\n\
                    2020-1-5,NAT_TOTAL,USA,,United States,,10\n";

        let err = SourceReader::new().read_from(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::InvalidDate { row: 1, ref value } if value == "2020-1-5"
        ));
    }

    #[test]
    fn test_missing_column() {
        let data = "Date,Jurisdiction,CountryCode\n20200101,NAT_TOTAL,USA\n";
        let err = SourceReader::new().read_from(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::MissingColumn { ref column, .. } if column == "RegionCode"
        ));
    }

    #[test]
    fn test_invalid_confirmed_cases() {
        let data = "Date,Jurisdiction,CountryCode,RegionCode,CountryName,RegionName,ConfirmedCases\n\
                    20200101,NAT_TOTAL,USA,,United States,,many\n";
        assert!(matches!(
            SourceReader::new().read_from(data.as_bytes()),
            Err(ProcessingError::InvalidFormat(_))
        ));
    }
}
