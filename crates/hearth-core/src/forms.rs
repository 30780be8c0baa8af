//! Validated user input for new purchases and chores
//!
//! Drafts hold what a form collects before a row exists; validation failures
//! are synchronous [`CoreError::InvalidArgument`] values, never silent
//! defaults.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::recurrence::Recurrence;
use crate::warranty::{warranty_end_date, WarrantyUnit};

/// Input for a purchase that has not been stored yet
#[derive(Debug, Clone)]
pub struct PurchaseDraft {
    pub name: String,
    pub price: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub warranty_period: Option<u32>,
    pub warranty_unit: WarrantyUnit,
}

impl PurchaseDraft {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid_argument("purchase name is required"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(CoreError::invalid_argument("price must be positive"));
        }
        Ok(())
    }

    /// Derived warranty end date, `None` when no (or zero) period was entered
    pub fn warranty_end_date(&self) -> Option<NaiveDate> {
        warranty_end_date(self.date, self.warranty_period.unwrap_or(0), self.warranty_unit)
    }
}

/// Input for a chore that has not been stored yet
#[derive(Debug, Clone)]
pub struct ChoreDraft {
    pub name: String,
    pub due_date: NaiveDate,
    pub recurrence: Recurrence,
    pub notes: Option<String>,
    pub category: Option<String>,
}

impl ChoreDraft {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid_argument("chore name is required"));
        }
        Ok(())
    }
}
