//! Row types for the `purchases` and `chores` tables
//!
//! Serde field names match the hosted table columns, which use camelCase
//! for chores and snake_case for purchases.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::Recurrence;
use crate::warranty::remaining_whole_months;

/// A tracked purchase with optional warranty coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub price: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub warranty_end_date: Option<NaiveDate>,
}

impl Purchase {
    /// Whole months of warranty coverage left as of `today`
    pub fn remaining_warranty_months(&self, today: NaiveDate) -> u32 {
        remaining_whole_months(self.warranty_end_date, today)
    }
}

/// A household chore with optional recurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    #[serde(rename = "recurringPeriod", default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Chore {
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }
}

/// Sum of purchase prices
pub fn total_spending(purchases: &[Purchase]) -> f64 {
    purchases.iter().map(|p| p.price).sum()
}
