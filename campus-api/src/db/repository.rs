//! Storage contract for any record shape

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{Entity, Filter, Page, ValidationError};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DbError {
    pub fn not_found<T: Entity>(id: Uuid) -> Self {
        Self::NotFound {
            resource: T::RESOURCE,
            id: id.to_string(),
        }
    }
}

/// CRUD + filtered pagination over one table.
///
/// Reads only ever see active (not soft-deleted) rows.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a new record, generating its id if nil. Returns the stored row.
    async fn create(&self, record: T) -> Result<T, DbError>;

    /// Fetch one active record.
    async fn get_by_id(&self, id: Uuid) -> Result<T, DbError>;

    /// Fetch one page of active records matching every filter pair, plus the
    /// total number of matches ignoring the page.
    async fn get_all(&self, filter: &Filter, page: Page) -> Result<(Vec<T>, i64), DbError>;

    /// Replace every resource column of the active record with `record`'s id.
    async fn update(&self, record: T) -> Result<T, DbError>;

    /// Overlay `changes` (column name to JSON value) on the active record in a
    /// single statement, so concurrent patches of different fields all land.
    /// Keys that aren't resource columns are ignored.
    async fn patch(&self, id: Uuid, changes: &Map<String, Value>) -> Result<T, DbError>;

    /// Stamp the soft-delete marker. Deleting twice is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), DbError>;
}

/// Hands out a repository for each record shape.
pub trait RepositoryProvider {
    fn repository<T: Entity>(&self) -> Arc<dyn Repository<T>>;
}

/// Reject filter fields the record shape doesn't have.
pub fn check_filter<T: Entity>(filter: &Filter) -> Result<(), ValidationError> {
    match filter.iter().find(|(field, _)| !T::has_column(field)) {
        Some((field, _)) => Err(ValidationError::UnknownFilter {
            resource: T::RESOURCE,
            field: field.to_owned(),
        }),
        None => Ok(()),
    }
}

/// The subset of `changes` naming resource columns of `T`.
///
/// Drops `id` and the timestamps, which a patch never writes.
pub fn patchable_columns<T: Entity>(changes: &Map<String, Value>) -> Map<String, Value> {
    changes
        .iter()
        .filter(|(key, _)| T::COLUMNS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
