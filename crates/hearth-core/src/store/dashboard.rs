//! Dashboard aggregation
//!
//! One snapshot call gathers everything the landing view shows: who is
//! signed in, their most recent purchases, their soonest chores, and total
//! spending.

use std::sync::Arc;

use tracing::debug;

use crate::backend::{AuthService, BackendError, TableStore};
use crate::models::{total_spending, Chore, Purchase};
use crate::store::{ChoreStore, PurchaseStore};

/// How many recent purchases and upcoming chores a snapshot carries
const PREVIEW_LIMIT: usize = 5;

/// Everything the dashboard shows for the signed-in user
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub greeting_name: String,
    pub recent_purchases: Vec<Purchase>,
    pub upcoming_chores: Vec<Chore>,
    pub total_spending: f64,
}

/// Aggregates the stores behind one snapshot call
pub struct Dashboard {
    auth: Arc<dyn AuthService>,
    purchases: PurchaseStore,
    chores: ChoreStore,
}

impl Dashboard {
    pub fn new(auth: Arc<dyn AuthService>, tables: Arc<dyn TableStore>) -> Self {
        Self {
            auth,
            purchases: PurchaseStore::new(tables.clone()),
            chores: ChoreStore::new(tables),
        }
    }

    pub fn purchases(&self) -> &PurchaseStore {
        &self.purchases
    }

    pub fn chores(&self) -> &ChoreStore {
        &self.chores
    }

    /// Snapshot for the currently signed-in user
    pub async fn snapshot(&self) -> Result<DashboardSnapshot, BackendError> {
        let user = self
            .auth
            .get_user()
            .await?
            .ok_or(BackendError::NotAuthenticated)?;

        let recent_purchases = self.purchases.recent(user.id, PREVIEW_LIMIT).await?;
        let upcoming_chores = self.chores.upcoming(user.id, PREVIEW_LIMIT).await?;
        let all_purchases = self.purchases.list(user.id).await?;
        debug!(
            purchases = all_purchases.len(),
            chores = upcoming_chores.len(),
            "dashboard snapshot built"
        );

        Ok(DashboardSnapshot {
            greeting_name: user.display_name().to_string(),
            recent_purchases,
            upcoming_chores,
            total_spending: total_spending(&all_purchases),
        })
    }
}
