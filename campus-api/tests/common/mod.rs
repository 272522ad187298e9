//! In-memory storage for exercising the HTTP layer without Postgres.

#![allow(dead_code)]

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use campus_api::db::repository::{check_filter, patchable_columns};
use campus_api::models::{Entity, Filter, FilterValue, Page, ValidationError};
use campus_api::{DbError, Repository, RepositoryProvider};
use chrono::Utc;
use serde_json::{Map, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// Rows of one shape, in insertion (= creation) order
pub struct MemoryRepository<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Entity> MemoryRepository<T> {
    /// Every stored row, soft-deleted ones included
    pub fn all_rows(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }
}

fn filter_value_json(value: &FilterValue) -> Value {
    match value {
        FilterValue::Uuid(v) => Value::String(v.to_string()),
        FilterValue::Text(v) => Value::String(v.clone()),
        FilterValue::Int(v) => Value::from(*v),
        FilterValue::Bool(v) => Value::Bool(*v),
    }
}

fn matches<T: Entity>(record: &T, filter: &Filter) -> bool {
    let json = serde_json::to_value(record).unwrap();
    filter
        .iter()
        .all(|(field, value)| json.get(field) == Some(&filter_value_json(value)))
}

fn is_active<T: Entity>(record: &T) -> bool {
    record.base().deleted_at.is_none()
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn create(&self, mut record: T) -> Result<T, DbError> {
        if record.id().is_nil() {
            record.set_id(Uuid::new_v4());
        }
        let now = Utc::now();
        let base = record.base_mut();
        base.created_at = now;
        base.updated_at = now;
        base.deleted_at = None;

        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<T, DbError> {
        // Let concurrent requests interleave between a read and the write after it
        tokio::task::yield_now().await;

        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id && is_active(*r))
            .cloned()
            .ok_or_else(|| DbError::not_found::<T>(id))
    }

    async fn get_all(&self, filter: &Filter, page: Page) -> Result<(Vec<T>, i64), DbError> {
        check_filter::<T>(filter)?;

        let rows = self.rows.lock().unwrap();
        let matching: Vec<&T> = rows
            .iter()
            .filter(|r| is_active(*r) && matches(*r, filter))
            .collect();

        let count = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();

        Ok((data, count))
    }

    async fn update(&self, mut record: T) -> Result<T, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(stored) = rows
            .iter_mut()
            .find(|r| r.id() == record.id() && r.base().deleted_at.is_none())
        else {
            return Err(DbError::not_found::<T>(record.id()));
        };

        let created_at = stored.base().created_at;
        let base = record.base_mut();
        base.created_at = created_at;
        base.updated_at = Utc::now();
        base.deleted_at = None;

        *stored = record.clone();
        Ok(record)
    }

    async fn patch(&self, id: Uuid, changes: &Map<String, Value>) -> Result<T, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(stored) = rows
            .iter_mut()
            .find(|r| r.id() == id && r.base().deleted_at.is_none())
        else {
            return Err(DbError::not_found::<T>(id));
        };

        let mut merged = serde_json::to_value(&*stored).unwrap();
        if let Value::Object(fields) = &mut merged {
            fields.extend(patchable_columns::<T>(changes));
        }
        let mut record: T = serde_json::from_value(merged).map_err(|e| {
            DbError::Validation(ValidationError::InvalidBody {
                reason: e.to_string(),
            })
        })?;
        record.base_mut().updated_at = Utc::now();

        *stored = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows
            .iter_mut()
            .find(|r| r.id() == id && r.base().deleted_at.is_none()) {
            row.base_mut().deleted_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// One shared [`MemoryRepository`] per record shape
#[derive(Default)]
pub struct MemoryProvider {
    repos: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl MemoryProvider {
    pub fn store<T: Entity>(&self) -> Arc<MemoryRepository<T>> {
        let mut repos = self.repos.lock().unwrap();
        let entry = repos
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(MemoryRepository::<T>::default()));
        entry.clone().downcast::<MemoryRepository<T>>().unwrap()
    }
}

impl RepositoryProvider for MemoryProvider {
    fn repository<T: Entity>(&self) -> Arc<dyn Repository<T>> {
        self.store::<T>()
    }
}

/// Send one request, returning status and parsed JSON body (Null if empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
