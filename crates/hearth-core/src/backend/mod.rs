//! Backend-as-a-service boundary
//!
//! The hosted auth and table-CRUD collaborators are opaque remote services.
//! They appear here only as traits so the stores take them as
//! constructor-injected dependencies; [`memory::InMemoryBackend`] implements
//! both for tests and demos.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::error::CoreError;

pub use memory::InMemoryBackend;

/// Failure reported by the backend or while mapping its rows
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("auth error: {0}")]
    Auth(String),
    #[error("{message}")]
    Service {
        message: String,
        details: Option<String>,
    },
    #[error("row decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl BackendError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            details: None,
        }
    }
}

/// Email/password pair for sign-up and sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Sign-up input rules: a plausible email and a password of at least
    /// eight characters.
    pub fn validate(&self) -> Result<(), CoreError> {
        let email = self.email.trim();
        let valid_email = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.contains(char::is_whitespace)
            }
            None => false,
        };
        if !valid_email {
            return Err(CoreError::invalid_argument("invalid email address"));
        }
        if self.password.chars().count() < 8 {
            return Err(CoreError::invalid_argument(
                "password must be at least 8 characters long",
            ));
        }
        Ok(())
    }
}

/// Profile metadata attached to an account at sign-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub metadata: UserMetadata,
}

impl User {
    /// Name to greet the user with: full name if set, email otherwise
    pub fn display_name(&self) -> &str {
        self.metadata.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// A signed-in session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
}

/// Authentication/session service
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_up(
        &self,
        credentials: &Credentials,
        full_name: Option<&str>,
    ) -> Result<User, BackendError>;

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, BackendError>;

    /// The currently signed-in user, if any
    async fn get_user(&self) -> Result<Option<User>, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;
}

/// Conjunction of column equality clauses
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((column.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether a row object satisfies every clause
    pub fn matches(&self, row: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }
}

/// Sort direction for a select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Row selection: equality filter, optional ordering, optional limit
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filter: Filter,
    pub order_by: Option<(String, SortOrder)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Document-store CRUD over named tables of JSON rows
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert rows, returning them with server-assigned ids filled in
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, BackendError>;

    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, BackendError>;

    /// Merge `fields` into every row matching `filter`, returning the
    /// updated rows
    async fn update(
        &self,
        table: &str,
        fields: Value,
        filter: Filter,
    ) -> Result<Vec<Value>, BackendError>;

    /// Delete matching rows, returning how many were removed
    async fn delete(&self, table: &str, filter: Filter) -> Result<u64, BackendError>;
}
