//! Typed access to the backend tables
//!
//! Each store wraps the CRUD boundary for one table and speaks in model
//! types; [`Dashboard`] aggregates across them.

pub mod chores;
pub mod dashboard;
pub mod purchases;

pub use chores::ChoreStore;
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use purchases::PurchaseStore;
