//! Holiday lookups for a jurisdiction code and day.

pub mod calendar;

pub use calendar::CalendarOracle;

use crate::error::Result;
use crate::models::HolidayIndicator;

/// Answers whether a holiday applies to a jurisdiction on a given day.
///
/// `date` is formatted `YYYYMMDD`. Implementations fail on any other format.
pub trait HolidayOracle {
    fn holiday_area(&self, code: &str, date: &str) -> Result<HolidayIndicator>;
}
