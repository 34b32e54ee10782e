use crate::error::{ApiError, ErrorResponse};
use crate::extract::Payload;
use crate::models::ReadRequest;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value as JsonValue;

/// GET /read handler - Return every document in a collection
///
/// The connection information travels in the request body. Each document is
/// returned without its `_id` field.
#[utoipa::path(
    get,
    path = routes::READ,
    request_body = ReadRequest,
    responses(
        (status = 200, description = "All documents in the collection", body = Vec<serde_json::Value>),
        (status = 400, description = "Missing connection information", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn read_handler(
    State(state): State<AppState>,
    Payload(request): Payload<ReadRequest>,
) -> Result<(StatusCode, Json<Vec<JsonValue>>), ApiError> {
    let documents = state.store.read(&request.connection).await?;

    tracing::info!(
        "Read {} documents from {}.{}",
        documents.len(),
        request.connection.database,
        request.connection.collection
    );
    Ok((StatusCode::OK, Json(documents)))
}
