//! Chore recurrence
//!
//! Reschedules a completed chore onto its next due date. Month-based
//! periods use the same end-of-month clamping as the warranty math.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How often a chore repeats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl Recurrence {
    /// Whether the chore repeats at all
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Next due date after completing the chore due on `after`.
    ///
    /// `None` for non-recurring chores or when the result would leave the
    /// calendar range.
    pub fn next_due(&self, after: NaiveDate) -> Option<NaiveDate> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => after.checked_add_days(Days::new(1)),
            Recurrence::Weekly => after.checked_add_days(Days::new(7)),
            Recurrence::Monthly => after.checked_add_months(Months::new(1)),
            Recurrence::Quarterly => after.checked_add_months(Months::new(3)),
            Recurrence::Annually => after.checked_add_months(Months::new(12)),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Quarterly => "quarterly",
            Recurrence::Annually => "annually",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Recurrence {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "quarterly" => Ok(Recurrence::Quarterly),
            "annually" | "yearly" => Ok(Recurrence::Annually),
            other => Err(CoreError::invalid_argument(format!(
                "unknown recurrence '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn non_recurring_has_no_next_date() {
        assert_eq!(Recurrence::None.next_due(date(2023, 6, 1)), None);
        assert!(!Recurrence::None.is_recurring());
    }

    #[test]
    fn day_based_periods() {
        let due = date(2023, 12, 31);
        assert_eq!(Recurrence::Daily.next_due(due), Some(date(2024, 1, 1)));
        assert_eq!(Recurrence::Weekly.next_due(due), Some(date(2024, 1, 7)));
    }

    #[test]
    fn month_based_periods_clamp_at_month_end() {
        let due = date(2023, 1, 31);
        assert_eq!(Recurrence::Monthly.next_due(due), Some(date(2023, 2, 28)));
        assert_eq!(Recurrence::Quarterly.next_due(due), Some(date(2023, 4, 30)));
        assert_eq!(Recurrence::Annually.next_due(due), Some(date(2024, 1, 31)));
    }

    #[test]
    fn parses_stored_strings() {
        assert_eq!("monthly".parse::<Recurrence>(), Ok(Recurrence::Monthly));
        assert_eq!("".parse::<Recurrence>(), Ok(Recurrence::None));
        assert!("fortnightly".parse::<Recurrence>().is_err());
    }

    #[test]
    fn serde_round_trip_uses_lowercase() {
        let json = serde_json::to_string(&Recurrence::Quarterly).unwrap();
        assert_eq!(json, "\"quarterly\"");
        let back: Recurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Recurrence::Quarterly);
    }
}
