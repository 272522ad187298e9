//! Database layer - connection pool, schema, and the generic repository
//!
//! # Design Principles
//!
//! - One repository implementation for every record shape
//! - Single-statement operations, no transactions
//! - Soft delete only; reads never see deleted rows
//! - Rely on DB constraints (unique, foreign key), surface violations as errors

pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use pool::{create_pool, create_pool_with_options, PoolConfig};
pub use postgres::PgRepository;
pub use repository::{DbError, Repository, RepositoryProvider};
