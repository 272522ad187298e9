//! Health check endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

impl HealthResponse {
    fn new(database_ok: bool) -> (StatusCode, Self) {
        if database_ok {
            (
                StatusCode::OK,
                Self {
                    status: "ok",
                    version: env!("CARGO_PKG_VERSION"),
                    database: "connected",
                },
            )
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Self {
                    status: "degraded",
                    version: env!("CARGO_PKG_VERSION"),
                    database: "unreachable",
                },
            )
        }
    }
}

/// GET /health
async fn health(State(pool): State<PgPool>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unreachable");
            false
        }
    };

    let (status, body) = HealthResponse::new(database_ok);
    (status, Json(body))
}

/// Health routes
pub fn router() -> Router<PgPool> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_database_is_ok() {
        let (status, body) = HealthResponse::new(true);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "connected");
    }

    #[test]
    fn unreachable_database_is_503() {
        let (status, body) = HealthResponse::new(false);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.database, "unreachable");
    }
}
