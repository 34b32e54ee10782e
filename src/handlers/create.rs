use crate::error::{ApiError, ErrorResponse};
use crate::extract::Payload;
use crate::models::{CreateRequest, StatusResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /create handler - Insert one document
#[utoipa::path(
    post,
    path = routes::CREATE,
    request_body = CreateRequest,
    responses(
        (status = 200, description = "Document inserted", body = StatusResponse),
        (status = 400, description = "Missing connection information or malformed document", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    Payload(request): Payload<CreateRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let id = state
        .store
        .create(&request.connection, request.document)
        .await?;

    tracing::info!("Successfully inserted document with id: {}", id);
    Ok((StatusCode::OK, Json(StatusResponse::inserted(id))))
}
