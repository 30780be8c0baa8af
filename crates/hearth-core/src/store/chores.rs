//! Chore CRUD over the `chores` table

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::backend::{BackendError, Filter, Query, SortOrder, TableStore};
use crate::forms::ChoreDraft;
use crate::models::Chore;

const TABLE: &str = "chores";

/// Typed chore operations for one injected table store
#[derive(Clone)]
pub struct ChoreStore {
    tables: Arc<dyn TableStore>,
}

impl ChoreStore {
    pub fn new(tables: Arc<dyn TableStore>) -> Self {
        Self { tables }
    }

    pub async fn add(&self, user_id: Uuid, draft: ChoreDraft) -> Result<Chore, BackendError> {
        draft.validate()?;
        let chore = Chore {
            id: Uuid::new_v4(),
            user_id,
            name: draft.name,
            due_date: draft.due_date,
            recurrence: draft.recurrence,
            notes: draft.notes,
            category: draft.category,
        };

        let row = serde_json::to_value(&chore)?;
        self.tables.insert(TABLE, vec![row]).await?;
        info!(name = %chore.name, due = %chore.due_date, "chore added");
        Ok(chore)
    }

    /// All chores for a user, soonest due date first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Chore>, BackendError> {
        self.query(user_id, None).await
    }

    /// The `limit` soonest-due chores for a user
    pub async fn upcoming(&self, user_id: Uuid, limit: usize) -> Result<Vec<Chore>, BackendError> {
        self.query(user_id, Some(limit)).await
    }

    async fn query(&self, user_id: Uuid, limit: Option<usize>) -> Result<Vec<Chore>, BackendError> {
        let mut query = Query::new()
            .filter(Filter::new().eq("user_id", user_id.to_string()))
            .order_by("dueDate", SortOrder::Ascending);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let rows = self.tables.select(TABLE, query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(BackendError::from))
            .collect()
    }

    /// Overwrite a stored chore with edited fields
    pub async fn update(&self, chore: &Chore) -> Result<(), BackendError> {
        let fields = serde_json::to_value(chore)?;
        let updated = self
            .tables
            .update(TABLE, fields, Filter::new().eq("id", chore.id.to_string()))
            .await?;
        if updated.is_empty() {
            return Err(BackendError::service("chore not found"));
        }
        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), BackendError> {
        let removed = self
            .tables
            .delete(TABLE, Filter::new().eq("id", id.to_string()))
            .await?;
        if removed == 0 {
            return Err(BackendError::service("chore not found"));
        }
        info!(%id, "chore deleted");
        Ok(())
    }

    /// Mark a chore done.
    ///
    /// A recurring chore is rescheduled to its next due date and returned;
    /// a one-off chore is deleted and `None` is returned.
    pub async fn complete(&self, id: Uuid) -> Result<Option<Chore>, BackendError> {
        let rows = self
            .tables
            .select(TABLE, Query::new().filter(Filter::new().eq("id", id.to_string())))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::service("chore not found"))?;
        let mut chore: Chore = serde_json::from_value(row)?;

        match chore.recurrence.next_due(chore.due_date) {
            Some(next_due) => {
                chore.due_date = next_due;
                self.tables
                    .update(
                        TABLE,
                        json!({ "dueDate": next_due }),
                        Filter::new().eq("id", id.to_string()),
                    )
                    .await?;
                info!(name = %chore.name, due = %next_due, "chore rescheduled");
                Ok(Some(chore))
            }
            None => {
                self.remove(id).await?;
                info!(name = %chore.name, "chore completed");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::recurrence::Recurrence;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> ChoreStore {
        ChoreStore::new(Arc::new(InMemoryBackend::new()))
    }

    fn draft(name: &str, due: NaiveDate, recurrence: Recurrence) -> ChoreDraft {
        ChoreDraft {
            name: name.into(),
            due_date: due,
            recurrence,
            notes: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn list_orders_by_due_date_ascending() {
        let store = store();
        let user = Uuid::new_v4();
        store
            .add(user, draft("Later", date(2023, 9, 1), Recurrence::None))
            .await
            .unwrap();
        store
            .add(user, draft("Soon", date(2023, 6, 1), Recurrence::None))
            .await
            .unwrap();

        let listed = store.list(user).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Soon", "Later"]);

        let upcoming = store.upcoming(user, 1).await.unwrap();
        assert_eq!(upcoming[0].name, "Soon");
    }

    #[tokio::test]
    async fn add_rejects_blank_name() {
        let store = store();
        let err = store
            .add(Uuid::new_v4(), draft("", date(2023, 6, 1), Recurrence::None))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Invalid(_)));
    }

    #[tokio::test]
    async fn completing_recurring_chore_reschedules() {
        let store = store();
        let user = Uuid::new_v4();
        let chore = store
            .add(user, draft("Mow lawn", date(2023, 1, 31), Recurrence::Monthly))
            .await
            .unwrap();

        let rescheduled = store.complete(chore.id).await.unwrap().unwrap();
        assert_eq!(rescheduled.due_date, date(2023, 2, 28));

        let listed = store.list(user).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].due_date, date(2023, 2, 28));
    }

    #[tokio::test]
    async fn completing_one_off_chore_deletes_it() {
        let store = store();
        let user = Uuid::new_v4();
        let chore = store
            .add(user, draft("Fix gate", date(2023, 5, 1), Recurrence::None))
            .await
            .unwrap();

        assert!(store.complete(chore.id).await.unwrap().is_none());
        assert!(store.list(user).await.unwrap().is_empty());
        assert!(store.complete(chore.id).await.is_err());
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let store = store();
        let user = Uuid::new_v4();
        let mut chore = store
            .add(user, draft("Vacuum", date(2023, 5, 1), Recurrence::Weekly))
            .await
            .unwrap();

        chore.notes = Some("upstairs too".into());
        chore.category = Some("Clean".into());
        store.update(&chore).await.unwrap();

        let listed = store.list(user).await.unwrap();
        assert_eq!(listed[0].notes.as_deref(), Some("upstairs too"));
        assert_eq!(listed[0].category.as_deref(), Some("Clean"));
    }
}
