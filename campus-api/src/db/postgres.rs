//! Postgres-backed repository, one instance per record shape
//!
//! Every operation is a single statement:
//! - create: INSERT ... RETURNING * (storage fills timestamps)
//! - list: COUNT(*) then SELECT page, both filtered on active rows
//! - update: UPDATE ... WHERE id AND active RETURNING *
//! - patch: UPDATE merging a JSONB object over the current row
//! - delete: UPDATE deleted_at, never DELETE
//!
//! Table and column names only ever come from `Entity` constants; every value
//! is a bound parameter.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::repository::{
    check_filter, patchable_columns, DbError, Repository, RepositoryProvider,
};
use crate::models::{Entity, Filter, FilterValue, Page, PgQuery};

/// Repository for `T` over a shared pool
pub struct PgRepository<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

impl RepositoryProvider for PgPool {
    fn repository<T: Entity>(&self) -> Arc<dyn Repository<T>> {
        Arc::new(PgRepository::<T>::new(self.clone()))
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn create(&self, mut record: T) -> Result<T, DbError> {
        if record.id().is_nil() {
            record.set_id(Uuid::new_v4());
        }

        let sql = insert_sql(T::TABLE, T::COLUMNS);
        let row = record
            .bind_columns(sqlx::query(&sql).bind(record.id()))
            .fetch_one(&self.pool)
            .await?;

        Ok(T::from_row(&row)?)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<T, DbError> {
        let sql = select_by_id_sql(T::TABLE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found::<T>(id))?;

        Ok(T::from_row(&row)?)
    }

    async fn get_all(&self, filter: &Filter, page: Page) -> Result<(Vec<T>, i64), DbError> {
        check_filter::<T>(filter)?;

        let count_sql = count_sql(T::TABLE, filter);
        let total: i64 = bind_filter(sqlx::query(&count_sql), filter)
            .fetch_one(&self.pool)
            .await?
            .try_get(0)?;

        let page_sql = select_page_sql(T::TABLE, filter);
        let rows = bind_filter(sqlx::query(&page_sql), filter)
            .bind(page.limit as i64)
            .bind(page.offset as i64)
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .iter()
            .map(|row| T::from_row(row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    async fn update(&self, record: T) -> Result<T, DbError> {
        let sql = update_sql(T::TABLE, T::COLUMNS);
        let row = record
            .bind_columns(sqlx::query(&sql).bind(record.id()))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found::<T>(record.id()))?;

        Ok(T::from_row(&row)?)
    }

    async fn patch(&self, id: Uuid, changes: &Map<String, Value>) -> Result<T, DbError> {
        let changes = Value::Object(patchable_columns::<T>(changes));

        let sql = patch_sql(T::TABLE, T::COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(changes)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found::<T>(id))?;

        Ok(T::from_row(&row)?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let sql = soft_delete_sql(T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            tracing::debug!(table = T::TABLE, %id, "delete matched no active row");
        }
        Ok(())
    }
}

/// Bind filter values in field order, starting at `$1`.
fn bind_filter<'q>(mut query: PgQuery<'q>, filter: &Filter) -> PgQuery<'q> {
    for (_, value) in filter.iter() {
        query = match value.clone() {
            FilterValue::Uuid(v) => query.bind(v),
            FilterValue::Text(v) => query.bind(v),
            FilterValue::Int(v) => query.bind(v),
            FilterValue::Bool(v) => query.bind(v),
        };
    }
    query
}

/// `WHERE` clause matching active rows and every filter pair (`$1..$n`).
fn where_clause(filter: &Filter) -> String {
    let mut clause = String::from("WHERE deleted_at IS NULL");
    for (i, (field, _)) in filter.iter().enumerate() {
        clause.push_str(&format!(" AND {} = ${}", field, i + 1));
    }
    clause
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let names = std::iter::once("id")
        .chain(columns.iter().copied())
        .collect::<Vec<_>>()
        .join(", ");
    let params = (1..=columns.len() + 1)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table, names, params
    )
}

fn select_by_id_sql(table: &str) -> String {
    format!(
        "SELECT * FROM {} WHERE id = $1 AND deleted_at IS NULL",
        table
    )
}

fn count_sql(table: &str, filter: &Filter) -> String {
    format!("SELECT COUNT(*) FROM {} {}", table, where_clause(filter))
}

/// Page query. Ordered by creation time, then id, so pages are stable.
fn select_page_sql(table: &str, filter: &Filter) -> String {
    let n = filter.len();
    format!(
        "SELECT * FROM {} {} ORDER BY created_at ASC, id ASC LIMIT ${} OFFSET ${}",
        table,
        where_clause(filter),
        n + 1,
        n + 2
    )
}

/// Full-column replace; `$1` is the id, columns follow from `$2`.
fn update_sql(table: &str, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ${}", col, i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {}, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        table, assignments
    )
}

/// Merge `$2` (a JSONB object) over the stored row and write back every
/// resource column; `$1` is the id. Reading and writing happen in the same
/// statement, so the row can't change in between.
fn patch_sql(table: &str, columns: &[&str]) -> String {
    let names = columns.join(", ");
    let patched = columns
        .iter()
        .map(|col| format!("patched.{}", col))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {t} SET ({names}) = (SELECT {patched} FROM \
         jsonb_populate_record(NULL::{t}, to_jsonb({t}) || $2::jsonb) AS patched), \
         updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        t = table,
        names = names,
        patched = patched
    )
}

fn soft_delete_sql(table: &str) -> String {
    format!(
        "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        table
    )
}
