use crate::error::{HealthResponse, ReadinessResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - Liveness check
///
/// Always reports the service as up. The document store is not consulted;
/// use `/ready` for that.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "UP".to_string(),
        }),
    )
}

/// GET /ready handler - Readiness check
///
/// Pings the document store. Returns 200 OK if it answers, 503 Service
/// Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::READY,
    responses(
        (status = 200, description = "Document store is reachable", body = ReadinessResponse),
        (status = 503, description = "Document store is unreachable", body = ReadinessResponse)
    ),
    tag = "health"
)]
pub async fn ready_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    match state.store.ping().await {
        Ok(()) => {
            tracing::debug!("Readiness check passed");
            (
                StatusCode::OK,
                Json(ReadinessResponse {
                    status: "READY".to_string(),
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!("Readiness check failed: {:#}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "DOWN".to_string(),
                    error: Some(format!("Cannot connect to database: {}", e)),
                }),
            )
        }
    }
}
