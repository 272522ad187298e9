//! HTTP layer
//!
//! Axum server with:
//! - One generic handler set shared by every resource
//! - JSON error responses
//! - Request tracing, timeouts and CORS
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod handler;
pub mod router;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use handler::{GenericHandler, ListParams};
pub use router::{api_router, resource, API_PREFIX};
pub use server::{build_app, run_server, ServerConfig, ServerError};
