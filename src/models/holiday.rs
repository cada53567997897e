use serde::{Deserialize, Serialize};

/// Answer of the holiday oracle for one place and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolidayIndicator {
    Holiday,
    WorkingDay,
}

impl HolidayIndicator {
    pub fn from_bool(is_holiday: bool) -> Self {
        if is_holiday {
            HolidayIndicator::Holiday
        } else {
            HolidayIndicator::WorkingDay
        }
    }

    pub fn is_holiday(&self) -> bool {
        matches!(self, HolidayIndicator::Holiday)
    }

    /// Output encoding: `1` for a holiday, `0` otherwise.
    pub fn as_flag(&self) -> u8 {
        match self {
            HolidayIndicator::Holiday => 1,
            HolidayIndicator::WorkingDay => 0,
        }
    }
}
