use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::ApiError;

/// JSON body extractor with the service's validation rules
///
/// The body is read regardless of `Content-Type`, must be a non-empty JSON
/// object, and must deserialize into `T`. A body over the router's limit is
/// [`ApiError::PayloadTooLarge`]; every other failure collapses into
/// [`ApiError::MissingConnectionInfo`] and the precise reason is only logged.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Failed to read request body: {}", e);
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge
            } else {
                ApiError::MissingConnectionInfo
            }
        })?;

        parse_payload(&body).map(Payload)
    }
}

fn parse_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: JsonValue = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Request body is not valid JSON: {}", e);
        ApiError::MissingConnectionInfo
    })?;

    match &value {
        JsonValue::Object(map) if !map.is_empty() => {}
        _ => {
            tracing::debug!("Request body is not a non-empty JSON object");
            return Err(ApiError::MissingConnectionInfo);
        }
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::debug!("Request body rejected: {}", e);
        ApiError::MissingConnectionInfo
    })
}
