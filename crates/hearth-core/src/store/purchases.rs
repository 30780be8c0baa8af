//! Purchase CRUD over the `purchases` table

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::backend::{BackendError, Filter, Query, SortOrder, TableStore};
use crate::forms::PurchaseDraft;
use crate::models::Purchase;

const TABLE: &str = "purchases";

/// Typed purchase operations for one injected table store
#[derive(Clone)]
pub struct PurchaseStore {
    tables: Arc<dyn TableStore>,
}

impl PurchaseStore {
    pub fn new(tables: Arc<dyn TableStore>) -> Self {
        Self { tables }
    }

    /// Validate a draft, derive its warranty end date, and store it
    pub async fn add(&self, user_id: Uuid, draft: PurchaseDraft) -> Result<Purchase, BackendError> {
        draft.validate()?;
        let purchase = Purchase {
            id: Uuid::new_v4(),
            user_id,
            warranty_end_date: draft.warranty_end_date(),
            name: draft.name,
            price: draft.price,
            date: draft.date,
            notes: draft.notes,
        };

        let row = serde_json::to_value(&purchase)?;
        self.tables.insert(TABLE, vec![row]).await?;
        info!(name = %purchase.name, "purchase added");
        Ok(purchase)
    }

    /// All purchases for a user, most recent purchase date first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Purchase>, BackendError> {
        self.query(user_id, None).await
    }

    /// The `limit` most recent purchases for a user
    pub async fn recent(&self, user_id: Uuid, limit: usize) -> Result<Vec<Purchase>, BackendError> {
        self.query(user_id, Some(limit)).await
    }

    async fn query(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<Purchase>, BackendError> {
        let mut query = Query::new()
            .filter(Filter::new().eq("user_id", user_id.to_string()))
            .order_by("date", SortOrder::Descending);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let rows = self.tables.select(TABLE, query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(BackendError::from))
            .collect()
    }

    /// Overwrite a stored purchase with edited fields
    pub async fn update(&self, purchase: &Purchase) -> Result<(), BackendError> {
        let fields = serde_json::to_value(purchase)?;
        let updated = self
            .tables
            .update(TABLE, fields, Filter::new().eq("id", purchase.id.to_string()))
            .await?;
        if updated.is_empty() {
            return Err(BackendError::service("purchase not found"));
        }
        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), BackendError> {
        let removed = self
            .tables
            .delete(TABLE, Filter::new().eq("id", id.to_string()))
            .await?;
        if removed == 0 {
            return Err(BackendError::service("purchase not found"));
        }
        info!(%id, "purchase deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::warranty::WarrantyUnit;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> PurchaseStore {
        PurchaseStore::new(Arc::new(InMemoryBackend::new()))
    }

    fn draft(name: &str, date: NaiveDate, warranty_months: Option<u32>) -> PurchaseDraft {
        PurchaseDraft {
            name: name.into(),
            price: 100.0,
            date,
            notes: None,
            warranty_period: warranty_months,
            warranty_unit: WarrantyUnit::Months,
        }
    }

    #[tokio::test]
    async fn add_derives_warranty_end_date() {
        let store = store();
        let user = Uuid::new_v4();
        let purchase = store
            .add(user, draft("Fridge", date(2023, 1, 31), Some(1)))
            .await
            .unwrap();
        assert_eq!(purchase.warranty_end_date, Some(date(2023, 2, 28)));

        let no_warranty = store
            .add(user, draft("Kettle", date(2023, 1, 31), None))
            .await
            .unwrap();
        assert_eq!(no_warranty.warranty_end_date, None);
    }

    #[tokio::test]
    async fn add_rejects_invalid_draft() {
        let store = store();
        let mut bad = draft("", date(2023, 1, 1), None);
        let err = store.add(Uuid::new_v4(), bad.clone()).await.unwrap_err();
        assert!(matches!(err, BackendError::Invalid(_)));

        bad.name = "Fridge".into();
        bad.price = -5.0;
        assert!(store.add(Uuid::new_v4(), bad).await.is_err());
    }

    #[tokio::test]
    async fn list_is_scoped_to_user_and_date_descending() {
        let store = store();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.add(user, draft("Old", date(2023, 1, 1), None)).await.unwrap();
        store.add(user, draft("New", date(2023, 6, 1), None)).await.unwrap();
        store.add(other, draft("Theirs", date(2023, 7, 1), None)).await.unwrap();

        let listed = store.list(user).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Old"]);

        let recent = store.recent(user, 1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].name, "New");
    }

    #[tokio::test]
    async fn update_and_remove_round_trip() {
        let store = store();
        let user = Uuid::new_v4();
        let mut purchase = store
            .add(user, draft("Fridge", date(2023, 1, 1), None))
            .await
            .unwrap();

        purchase.notes = Some("extended warranty declined".into());
        store.update(&purchase).await.unwrap();
        let listed = store.list(user).await.unwrap();
        assert_eq!(listed[0].notes.as_deref(), Some("extended warranty declined"));

        store.remove(purchase.id).await.unwrap();
        assert!(store.list(user).await.unwrap().is_empty());
        assert!(store.remove(purchase.id).await.is_err());
    }
}
