//! In-memory backend for tests and demos
//!
//! Implements both boundary traits with tokio `RwLock`-guarded state. Rows
//! are stored as JSON objects keyed by table name; auth keeps one current
//! session at a time, like the hosted service's client-side session.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{
    AuthService, BackendError, Credentials, Filter, Query, Session, SortOrder, TableStore, User,
    UserMetadata,
};

struct Account {
    user: User,
    password: String,
}

/// Backend stand-in holding everything in process memory
#[derive(Default)]
pub struct InMemoryBackend {
    accounts: RwLock<Vec<Account>>,
    session: RwLock<Option<User>>,
    tables: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthService for InMemoryBackend {
    async fn sign_up(
        &self,
        credentials: &Credentials,
        full_name: Option<&str>,
    ) -> Result<User, BackendError> {
        credentials.validate()?;
        let email = credentials.email.trim().to_ascii_lowercase();

        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.user.email == email) {
            return Err(BackendError::Auth(format!(
                "an account already exists for {email}"
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            metadata: UserMetadata {
                full_name: full_name.map(|n| n.trim().to_string()),
            },
        };
        accounts.push(Account {
            user: user.clone(),
            password: credentials.password.clone(),
        });
        debug!(email = %user.email, "registered account");
        Ok(user)
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, BackendError> {
        let email = credentials.email.trim().to_ascii_lowercase();
        let accounts = self.accounts.read().await;
        let account = accounts
            .iter()
            .find(|a| a.user.email == email && a.password == credentials.password)
            .ok_or_else(|| BackendError::Auth("invalid email or password".into()))?;

        let user = account.user.clone();
        *self.session.write().await = Some(user.clone());
        debug!(email = %user.email, "signed in");
        Ok(Session {
            user,
            access_token: Uuid::new_v4().to_string(),
        })
    }

    async fn get_user(&self) -> Result<Option<User>, BackendError> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[async_trait]
impl TableStore for InMemoryBackend {
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, BackendError> {
        let mut tables = self.tables.write().await;
        let stored = tables.entry(table.to_string()).or_default();

        let mut inserted = Vec::with_capacity(rows.len());
        for mut row in rows {
            let object = row
                .as_object_mut()
                .ok_or_else(|| BackendError::service("rows must be JSON objects"))?;
            // Assign an id the way the hosted service would
            if !object.contains_key("id") || object["id"].is_null() {
                object.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
            }
            stored.push(row.clone());
            inserted.push(row);
        }
        debug!(table, count = inserted.len(), "inserted rows");
        Ok(inserted)
    }

    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, BackendError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filter.matches(row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, order)) = &query.order_by {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(column), b.get(column));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn update(
        &self,
        table: &str,
        fields: Value,
        filter: Filter,
    ) -> Result<Vec<Value>, BackendError> {
        let fields = fields
            .as_object()
            .ok_or_else(|| BackendError::service("update fields must be a JSON object"))?;

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| filter.matches(row)) {
            if let Some(object) = row.as_object_mut() {
                for (key, value) in fields {
                    object.insert(key.clone(), value.clone());
                }
                updated.push(row.clone());
            }
        }
        debug!(table, count = updated.len(), "updated rows");
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: Filter) -> Result<u64, BackendError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        let before = rows.len();
        rows.retain(|row| !filter.matches(row));
        let removed = (before - rows.len()) as u64;
        debug!(table, removed, "deleted rows");
        Ok(removed)
    }
}

/// Column ordering over the JSON scalar types the tables use.
/// Missing and null sort first; mixed types fall back to equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
