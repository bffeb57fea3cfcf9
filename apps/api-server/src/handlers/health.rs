//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub storage: StorageHealth,
}

#[derive(Serialize)]
pub struct StorageHealth {
    pub reachable: bool,
    pub posts: usize,
}

/// Health check endpoint - returns server status and storage reachability.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let storage = match state.posts.list() {
        Ok(posts) => StorageHealth {
            reachable: true,
            posts: posts.len(),
        },
        Err(e) => {
            tracing::warn!("Storage backend unreachable: {}", e);
            StorageHealth {
                reachable: false,
                posts: 0,
            }
        }
    };

    let response = HealthResponse {
        status: if storage.reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        storage,
    };

    HttpResponse::Ok().json(response)
}
