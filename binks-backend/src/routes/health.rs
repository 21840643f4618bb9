//! Health check endpoint
//!
//! `/health` always answers 200 while the process is up; the database block
//! reports whether a connection string was given and whether it answers a ping.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::warn;

use crate::routes::json_response;
use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    pub database: DatabaseHealth,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    /// DATABASE_URL was supplied
    pub configured: bool,
    /// The database answered a ping just now
    pub connected: bool,
}

async fn build_health_response(state: &AppState) -> HealthResponse {
    let connected = match &state.mongo {
        Some(mongo) => match mongo.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Health check ping failed: {}", e);
                false
            }
        },
        None => false,
    };

    HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            configured: state.args.database_configured(),
            connected,
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// GET /health
pub async fn health_check(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &build_health_response(state).await)
}
