//! Warranty date math
//!
//! Calendar-correct month/year addition with end-of-month clamping
//! (Jan 31 + 1 month = Feb 28/29), and remaining-coverage queries with
//! day-of-month floor semantics matching date-fns `differenceInMonths`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Unit of a vendor-specified warranty period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyUnit {
    Months,
    Years,
}

impl WarrantyUnit {
    fn to_months(self, period: u32) -> Option<u32> {
        match self {
            WarrantyUnit::Months => Some(period),
            WarrantyUnit::Years => period.checked_mul(12),
        }
    }
}

impl fmt::Display for WarrantyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarrantyUnit::Months => write!(f, "months"),
            WarrantyUnit::Years => write!(f, "years"),
        }
    }
}

impl FromStr for WarrantyUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "months" | "month" => Ok(WarrantyUnit::Months),
            "years" | "year" => Ok(WarrantyUnit::Years),
            other => Err(CoreError::invalid_argument(format!(
                "unknown warranty unit '{other}' (expected months or years)"
            ))),
        }
    }
}

/// Warranty end date for a purchase, or `None` when there is no coverage.
///
/// A zero period means no warranty, not an error. Day-of-month is preserved
/// where the target month has that day, otherwise clamped to the last valid
/// day. Returns `None` if the result would overflow the calendar range.
pub fn warranty_end_date(purchase: NaiveDate, period: u32, unit: WarrantyUnit) -> Option<NaiveDate> {
    if period == 0 {
        return None;
    }
    let months = unit.to_months(period)?;
    purchase.checked_add_months(Months::new(months))
}

/// Whole months of coverage left from `today` until `end`.
///
/// Zero when coverage is absent, already expired, or expiring today. A
/// partial month counts as zero: the month distance is reduced by one when
/// the end day-of-month has not been reached yet, so
/// `remaining_whole_months(Some(2023-02-28), 2023-01-31) == 0`.
pub fn remaining_whole_months(end: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(end) = end else { return 0 };
    if end <= today {
        return 0;
    }

    let months = (end.year() - today.year()) * 12 + (end.month() as i32 - today.month() as i32);
    let months = if end.day() < today.day() {
        months - 1
    } else {
        months
    };
    months.max(0) as u32
}

/// Parse a warranty period from form input.
///
/// Empty input means no warranty was entered. Negative or non-numeric input
/// is rejected rather than silently treated as no coverage.
pub fn parse_warranty_period(input: &str) -> Result<Option<u32>, CoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let period: i64 = trimmed
        .parse()
        .map_err(|_| CoreError::invalid_argument(format!("warranty period '{trimmed}' is not a number")))?;
    if period < 0 {
        return Err(CoreError::invalid_argument(
            "warranty period must not be negative",
        ));
    }
    u32::try_from(period)
        .map(Some)
        .map_err(|_| CoreError::invalid_argument("warranty period is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_addition_clamps_to_end_of_month() {
        assert_eq!(
            warranty_end_date(date(2023, 1, 31), 1, WarrantyUnit::Months),
            Some(date(2023, 2, 28))
        );
        // Leap year keeps the 29th
        assert_eq!(
            warranty_end_date(date(2024, 1, 31), 1, WarrantyUnit::Months),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn year_addition_preserves_day() {
        assert_eq!(
            warranty_end_date(date(2023, 1, 15), 1, WarrantyUnit::Years),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn zero_period_means_no_warranty() {
        assert_eq!(warranty_end_date(date(2023, 5, 1), 0, WarrantyUnit::Months), None);
        assert_eq!(warranty_end_date(date(2023, 5, 1), 0, WarrantyUnit::Years), None);
    }

    #[test]
    fn end_date_never_precedes_purchase() {
        let purchase = date(2023, 8, 31);
        for period in 1..=48 {
            let end = warranty_end_date(purchase, period, WarrantyUnit::Months).unwrap();
            assert!(end >= purchase, "period {period} produced {end}");
        }
    }

    #[test]
    fn remaining_months_partial_month_counts_as_zero() {
        // Jan 31 -> Feb 28 is less than one full month
        assert_eq!(remaining_whole_months(Some(date(2023, 2, 28)), date(2023, 1, 31)), 0);
    }

    #[test]
    fn remaining_months_no_or_expired_coverage_is_zero() {
        let today = date(2023, 6, 15);
        assert_eq!(remaining_whole_months(None, today), 0);
        assert_eq!(remaining_whole_months(Some(date(2022, 6, 15)), today), 0);
        assert_eq!(remaining_whole_months(Some(today), today), 0);
    }

    #[test]
    fn remaining_months_counts_whole_boundaries() {
        let today = date(2023, 1, 15);
        assert_eq!(remaining_whole_months(Some(date(2023, 2, 15)), today), 1);
        assert_eq!(remaining_whole_months(Some(date(2023, 2, 14)), today), 0);
        assert_eq!(remaining_whole_months(Some(date(2024, 1, 15)), today), 12);
        assert_eq!(remaining_whole_months(Some(date(2023, 1, 20)), today), 0);
    }

    #[test]
    fn round_trip_for_days_clear_of_month_end() {
        // For purchase days <= 28 no clamping occurs, so the computed end
        // date is exactly `period` whole months out.
        for day in [1, 15, 28] {
            let purchase = date(2023, 3, day);
            for period in [1, 6, 18] {
                let end = warranty_end_date(purchase, period, WarrantyUnit::Months);
                assert_eq!(remaining_whole_months(end, purchase), period);
            }
            let end = warranty_end_date(purchase, 2, WarrantyUnit::Years);
            assert_eq!(remaining_whole_months(end, purchase), 24);
        }
    }

    #[test]
    fn parses_form_periods() {
        assert_eq!(parse_warranty_period(""), Ok(None));
        assert_eq!(parse_warranty_period("  "), Ok(None));
        assert_eq!(parse_warranty_period("12"), Ok(Some(12)));
        assert_eq!(parse_warranty_period("0"), Ok(Some(0)));
        assert!(parse_warranty_period("-3").is_err());
        assert!(parse_warranty_period("soon").is_err());
    }

    #[test]
    fn parses_units() {
        assert_eq!("months".parse::<WarrantyUnit>(), Ok(WarrantyUnit::Months));
        assert_eq!("Years".parse::<WarrantyUnit>(), Ok(WarrantyUnit::Years));
        assert!("weeks".parse::<WarrantyUnit>().is_err());
    }
}
