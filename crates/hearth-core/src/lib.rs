//! Hearth core library
//!
//! The logic behind a household life-management app: purchases with
//! warranty tracking, chores with recurrence, a dashboard aggregation, a
//! typing-text animation, and the trait boundary to the hosted auth/CRUD
//! backend.

pub mod animation;
pub mod backend;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod recurrence;
pub mod store;
pub mod warranty;

pub use animation::{TypingAnimator, TypingConfig, TypingMachine};
pub use error::CoreError;
pub use models::{Chore, Purchase};
pub use recurrence::Recurrence;
pub use warranty::WarrantyUnit;
