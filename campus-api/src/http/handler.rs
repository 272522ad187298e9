//! Generic CRUD handlers
//!
//! One set of handlers serves every resource: each is instantiated per record
//! shape (`create::<Department>`, ...) and reaches storage only through the
//! shape's [`Usecase`]. Field semantics are never interpreted here.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::error::ApiError;
use super::extractors::{JsonBody, QueryParams, ValidUuid};
use crate::models::{Entity, Filter, Page, Paginated, ValidationError};
use crate::usecase::Usecase;

/// Query keys accepted as exact-match filters on list requests
pub const FILTERABLE_FIELDS: [&str; 4] = ["university_id", "department_id", "session_id", "batch_id"];

/// Handler state for one resource
pub struct GenericHandler<T: Entity> {
    usecase: Arc<dyn Usecase<T>>,
}

impl<T: Entity> GenericHandler<T> {
    pub fn new(usecase: Arc<dyn Usecase<T>>) -> Self {
        Self { usecase }
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub university_id: Option<String>,
    pub department_id: Option<String>,
    pub session_id: Option<String>,
    pub batch_id: Option<String>,
}

impl ListParams {
    /// Split into filter and page. Empty filter values are ignored; the rest
    /// must be UUIDs.
    pub fn into_parts(self) -> Result<(Filter, Page), ValidationError> {
        let page = Page::from_query(self.limit, self.offset);

        let values = [
            self.university_id,
            self.department_id,
            self.session_id,
            self.batch_id,
        ];

        let mut filter = Filter::new();
        for (field, value) in FILTERABLE_FIELDS.into_iter().zip(values) {
            let Some(raw) = value.filter(|v| !v.is_empty()) else {
                continue;
            };
            let id = Uuid::parse_str(&raw).map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "invalid UUID format",
            })?;
            filter.insert(field, id);
        }

        Ok((filter, page))
    }
}

/// POST /{resource}
pub async fn create<T: Entity>(
    State(handler): State<Arc<GenericHandler<T>>>,
    JsonBody(record): JsonBody<T>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let created = handler.usecase.create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /{resource}/{id}
pub async fn get_by_id<T: Entity>(
    State(handler): State<Arc<GenericHandler<T>>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<T>, ApiError> {
    let record = handler.usecase.get_by_id(id).await?;
    Ok(Json(record))
}

/// GET /{resource}?limit=&offset=&university_id=...
pub async fn get_all<T: Entity>(
    State(handler): State<Arc<GenericHandler<T>>>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Paginated<T>>, ApiError> {
    let (filter, page) = params.into_parts()?;
    let (data, count) = handler.usecase.get_all(&filter, page).await?;
    Ok(Json(Paginated::new(data, count, page)))
}

/// PUT /{resource}/{id}
///
/// The body is merged over the stored record, so omitted fields keep their
/// values. The path id always wins over any id in the body. Field types are
/// checked against the current record first; the write itself merges in
/// storage, so concurrent updates of different fields don't overwrite each
/// other.
pub async fn update<T: Entity>(
    State(handler): State<Arc<GenericHandler<T>>>,
    ValidUuid(id): ValidUuid,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<T>, ApiError> {
    let Value::Object(changes) = body else {
        return Err(ValidationError::InvalidBody {
            reason: "expected a JSON object".into(),
        }
        .into());
    };

    let current = handler.usecase.get_by_id(id).await?;
    merge_record(current, changes.clone())?;

    let updated = handler.usecase.patch(id, &changes).await?;
    Ok(Json(updated))
}

/// DELETE /{resource}/{id}
pub async fn delete<T: Entity>(
    State(handler): State<Arc<GenericHandler<T>>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Value>, ApiError> {
    handler.usecase.delete(id).await?;
    Ok(Json(json!({ "message": "Deleted successfully" })))
}

/// Overlay `changes` on the JSON form of `current` and decode the result.
fn merge_record<T: Entity>(current: T, changes: Map<String, Value>) -> Result<T, ApiError> {
    let mut value = serde_json::to_value(current).map_err(|e| ApiError::Internal {
        message: format!("failed to encode {}: {}", T::RESOURCE, e),
    })?;

    if let Value::Object(fields) = &mut value {
        fields.extend(changes);
    }

    serde_json::from_value(value).map_err(|e| {
        ApiError::Validation(ValidationError::InvalidBody {
            reason: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, FilterValue};

    #[test]
    fn list_params_defaults() {
        let (filter, page) = ListParams::default().into_parts().unwrap();
        assert!(filter.is_empty());
        assert_eq!(page, Page { limit: 10, offset: 0 });
    }

    #[test]
    fn list_params_collects_allow_listed_filters() {
        let dept = Uuid::new_v4();
        let params = ListParams {
            limit: Some(5),
            department_id: Some(dept.to_string()),
            batch_id: Some(String::new()),
            ..Default::default()
        };

        let (filter, page) = params.into_parts().unwrap();
        assert_eq!(page.limit, 5);
        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get("department_id"), Some(&FilterValue::Uuid(dept)));
    }

    #[test]
    fn list_params_rejects_malformed_uuid() {
        let params = ListParams {
            session_id: Some("not-a-uuid".into()),
            ..Default::default()
        };
        assert_eq!(
            params.into_parts().unwrap_err(),
            ValidationError::InvalidFormat {
                field: "session_id",
                reason: "invalid UUID format"
            }
        );
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let uni = Uuid::new_v4();
        let current: Department = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "name": "CSE",
            "code": "CSE",
            "university_id": uni,
            "semesters": 8,
        }))
        .unwrap();

        let mut changes = Map::new();
        changes.insert("name".into(), json!("CSE-Updated"));

        let merged = merge_record(current.clone(), changes).unwrap();
        assert_eq!(merged.name, "CSE-Updated");
        assert_eq!(merged.code, "CSE");
        assert_eq!(merged.university_id, uni);
        assert_eq!(merged.semesters, 8);
        assert_eq!(merged.base.id, current.base.id);
    }

    #[test]
    fn merge_rejects_wrong_types() {
        let current: Department = serde_json::from_value(json!({
            "name": "CSE",
            "university_id": Uuid::new_v4(),
        }))
        .unwrap();

        let mut changes = Map::new();
        changes.insert("semesters".into(), json!("eight"));

        let err = merge_record(current, changes).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::InvalidBody { .. })));
    }
}
