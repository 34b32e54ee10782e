use crate::error::{ApiError, ErrorResponse};
use crate::extract::Payload;
use crate::models::{DeleteRequest, StatusResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// DELETE /delete handler - Remove the first matching document
#[utoipa::path(
    delete,
    path = routes::DELETE,
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "\"Successfully Deleted\" or \"Document not found.\"", body = StatusResponse),
        (status = 400, description = "Missing connection information or malformed query", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Payload(request): Payload<DeleteRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let deleted = state
        .store
        .delete(&request.connection, request.filter)
        .await?;

    let response = StatusResponse::deleted(deleted);

    tracing::info!("Delete finished: {}", response.status);
    Ok((StatusCode::OK, Json(response)))
}
