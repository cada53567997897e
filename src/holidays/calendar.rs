use crate::error::{ProcessingError, Result};
use crate::holidays::HolidayOracle;
use crate::models::HolidayIndicator;
use crate::readers::HolidayReader;
use crate::utils::parse_compact_date;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;

/// Holiday oracle backed by an explicit calendar of (code, day) holidays.
#[derive(Debug, Clone, Default)]
pub struct CalendarOracle {
    holidays: HashSet<(String, NaiveDate)>,
}

impl CalendarOracle {
    pub fn new<I>(holidays: I) -> Self
    where
        I: IntoIterator<Item = (String, NaiveDate)>,
    {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self> {
        let holidays = HolidayReader::with_delimiter(delimiter).read_holidays(path)?;
        Ok(Self::new(holidays))
    }

    pub fn is_holiday(&self, code: &str, date: NaiveDate) -> bool {
        self.holidays.contains(&(code.to_string(), date))
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl HolidayOracle for CalendarOracle {
    fn holiday_area(&self, code: &str, date: &str) -> Result<HolidayIndicator> {
        let day = parse_compact_date(date).ok_or_else(|| {
            ProcessingError::InvalidFormat(format!(
                "Holiday lookup for {} expects a YYYYMMDD date, got '{}'",
                code, date
            ))
        })?;
        Ok(HolidayIndicator::from_bool(self.is_holiday(code, day)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> CalendarOracle {
        CalendarOracle::new(vec![
            ("USA".to_string(), NaiveDate::from_ymd_opt(2020, 7, 4).unwrap()),
            ("US_TX".to_string(), NaiveDate::from_ymd_opt(2020, 3, 2).unwrap()),
        ])
    }

    #[test]
    fn test_holiday_area() -> Result<()> {
        let oracle = oracle();
        assert_eq!(oracle.holiday_area("USA", "20200704")?, HolidayIndicator::Holiday);
        assert_eq!(oracle.holiday_area("USA", "20200705")?, HolidayIndicator::WorkingDay);
        assert_eq!(oracle.holiday_area("US_TX", "20200302")?, HolidayIndicator::Holiday);
        assert_eq!(oracle.holiday_area("GBR", "20200704")?, HolidayIndicator::WorkingDay);
        Ok(())
    }

    #[test]
    fn test_rejects_non_compact_dates() {
        let oracle = oracle();
        assert!(oracle.holiday_area("USA", "2020-07-04").is_err());
        assert!(oracle.holiday_area("USA", "").is_err());
        assert!(matches!(
            oracle.holiday_area("USA", "2020074"),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert!(oracle.holiday_area("USA", "2020-7-4").is_err());
    }
}
