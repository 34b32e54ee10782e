use crate::error::{ApiError, ErrorResponse};
use crate::extract::Payload;
use crate::models::{StatusResponse, UpdateRequest};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// PUT /update handler - `$set` fields on the first matching document
#[utoipa::path(
    put,
    path = routes::UPDATE,
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "\"Successfully Updated\" or \"Nothing was updated.\"", body = StatusResponse),
        (status = 400, description = "Missing connection information or malformed query", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Payload(request): Payload<UpdateRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let modified = state
        .store
        .update(&request.connection, request.filter, request.data_to_be_updated)
        .await?;

    let response = StatusResponse::updated(modified);

    tracing::info!("Update finished: {}", response.status);
    Ok((StatusCode::OK, Json(response)))
}
