//! Business layer between HTTP handlers and storage
//!
//! `GenericUsecase` forwards every call to its repository unchanged, errors
//! included. Per-resource rules (validation, authorization, cross-record
//! checks) belong in a `Usecase` impl that wraps or replaces it.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::{DbError, Repository};
use crate::models::{Entity, Filter, Page};

/// The operations a resource exposes
#[async_trait]
pub trait Usecase<T: Entity>: Send + Sync {
    async fn create(&self, record: T) -> Result<T, DbError>;
    async fn get_by_id(&self, id: Uuid) -> Result<T, DbError>;
    async fn get_all(&self, filter: &Filter, page: Page) -> Result<(Vec<T>, i64), DbError>;
    async fn update(&self, record: T) -> Result<T, DbError>;
    async fn patch(&self, id: Uuid, changes: &Map<String, Value>) -> Result<T, DbError>;
    async fn delete(&self, id: Uuid) -> Result<(), DbError>;
}

/// Pass-through usecase
pub struct GenericUsecase<T: Entity> {
    repo: Arc<dyn Repository<T>>,
}

impl<T: Entity> GenericUsecase<T> {
    pub fn new(repo: Arc<dyn Repository<T>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<T: Entity> Usecase<T> for GenericUsecase<T> {
    async fn create(&self, record: T) -> Result<T, DbError> {
        self.repo.create(record).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<T, DbError> {
        self.repo.get_by_id(id).await
    }

    async fn get_all(&self, filter: &Filter, page: Page) -> Result<(Vec<T>, i64), DbError> {
        self.repo.get_all(filter, page).await
    }

    async fn update(&self, record: T) -> Result<T, DbError> {
        self.repo.update(record).await
    }

    async fn patch(&self, id: Uuid, changes: &Map<String, Value>) -> Result<T, DbError> {
        self.repo.patch(id, changes).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::University;
    use std::sync::Mutex;

    /// Records calls and fails `get_by_id` for any id
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl Repository<University> for Recording {
        async fn create(&self, record: University) -> Result<University, DbError> {
            self.calls.lock().unwrap().push("create");
            Ok(record)
        }

        async fn get_by_id(&self, id: Uuid) -> Result<University, DbError> {
            self.calls.lock().unwrap().push("get_by_id");
            Err(DbError::not_found::<University>(id))
        }

        async fn get_all(
            &self,
            _filter: &Filter,
            _page: Page,
        ) -> Result<(Vec<University>, i64), DbError> {
            self.calls.lock().unwrap().push("get_all");
            Ok((vec![], 42))
        }

        async fn update(&self, record: University) -> Result<University, DbError> {
            self.calls.lock().unwrap().push("update");
            Ok(record)
        }

        async fn patch(
            &self,
            id: Uuid,
            _changes: &Map<String, Value>,
        ) -> Result<University, DbError> {
            self.calls.lock().unwrap().push("patch");
            Err(DbError::not_found::<University>(id))
        }

        async fn delete(&self, _id: Uuid) -> Result<(), DbError> {
            self.calls.lock().unwrap().push("delete");
            Ok(())
        }
    }

    fn university() -> University {
        serde_json::from_value(serde_json::json!({ "name": "DU" })).unwrap()
    }

    #[tokio::test]
    async fn forwards_every_operation() {
        let repo = Arc::new(Recording::default());
        let usecase = GenericUsecase::new(repo.clone() as Arc<dyn Repository<University>>);

        usecase.create(university()).await.unwrap();
        let _ = usecase.get_by_id(Uuid::new_v4()).await;
        let (_, total) = usecase.get_all(&Filter::new(), Page::default()).await.unwrap();
        usecase.update(university()).await.unwrap();
        let _ = usecase.patch(Uuid::new_v4(), &Map::new()).await;
        usecase.delete(Uuid::new_v4()).await.unwrap();

        assert_eq!(total, 42);
        assert_eq!(
            *repo.calls.lock().unwrap(),
            vec!["create", "get_by_id", "get_all", "update", "patch", "delete"]
        );
    }

    #[tokio::test]
    async fn preserves_errors() {
        let repo: Arc<dyn Repository<University>> = Arc::new(Recording::default());
        let usecase = GenericUsecase::new(repo);
        let id = Uuid::new_v4();

        let err = usecase.get_by_id(id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound { resource: "university", id: ref got } if *got == id.to_string()
        ));
    }
}
