use super::AppState;
use actix_web::{get, web, HttpResponse, Result};
use chrono::Utc;
use shared_types::{HealthResponse, VersionResponse};
use tracing::warn;

/// Reports 503 while the feedback store cannot be reached.
#[get("/api/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = &state.store;

    let (status, mut response) = match store.ping().await {
        Ok(()) => ("ok", HttpResponse::Ok()),
        Err(e) => {
            warn!(backend = store.backend(), error = %e, "Health check failed to reach store");
            ("unavailable", HttpResponse::ServiceUnavailable())
        }
    };

    Ok(response.json(HealthResponse {
        status: status.to_string(),
        store: store.backend().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[get("/api/version")]
pub async fn version_info() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
    }))
}
