//! campus-api: generic CRUD backend for campus resources
//!
//! Fourteen record shapes (universities, departments, people, study material,
//! transport) share one repository, one usecase and one handler set. Each
//! shape only declares its fields; storage, pagination, filtering and the
//! HTTP surface come from the generic layers.
//!
//! ```ignore
//! let pool = campus_api::db::create_pool(&database_url).await?;
//! campus_api::http::run_server(pool, ServerConfig::default()).await?;
//! ```

pub mod db;
pub mod http;
pub mod models;
pub mod usecase;

pub use db::{DbError, PgRepository, Repository, RepositoryProvider};
pub use http::{api_router, build_app, run_server, ApiError, ServerConfig, ServerError};
pub use models::{Entity, Filter, FilterValue, Page, Paginated};
pub use usecase::{GenericUsecase, Usecase};
