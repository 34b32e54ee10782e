use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned for every request that fails boundary validation
pub const MISSING_CONNECTION_INFO: &str = "Please provide connection information";

/// Largest accepted request body: a maximal 16 MiB BSON document plus room
/// for the JSON envelope around it
pub const MAX_BODY_BYTES: usize = 17 * 1024 * 1024;

/// Server error codes that mean the filter or update document was rejected
const MALFORMED_QUERY_CODES: &[i32] = &[
    2,  // BadValue
    9,  // FailedToParse
    14, // TypeMismatch
    52, // DollarPrefixedFieldName
    55, // InvalidDBRef
    56, // EmptyFieldName
    57, // DottedFieldName
    73, // InvalidNamespace
];

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
}

/// Response type for the liveness endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[serde(rename = "Status")]
    pub status: String,
}

/// Response type for the readiness endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReadinessResponse {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// A JSON payload that cannot be expressed as a BSON document
#[derive(Debug)]
pub struct InvalidDocument(pub String);

impl fmt::Display for InvalidDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for InvalidDocument {}

/// Custom error type for API endpoints
///
/// Store failures are classified by the underlying driver error so that
/// callers can tell a bad query apart from an unreachable database.
#[derive(Debug)]
pub enum ApiError {
    /// Body missing, unparseable, empty, or lacking a required key
    MissingConnectionInfo,
    /// Body exceeds the router's size limit
    PayloadTooLarge,
    /// The store rejected the filter or update document
    MalformedQuery(String),
    /// The store could not be reached
    StoreUnavailable(String),
    /// Any other database failure
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::MissingConnectionInfo => (
                StatusCode::BAD_REQUEST,
                MISSING_CONNECTION_INFO.to_string(),
            ),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Request body exceeds {} bytes", MAX_BODY_BYTES),
            ),
            ApiError::MalformedQuery(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Malformed query: {}", msg),
            ),
            ApiError::StoreUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Document store unavailable: {}", msg),
            ),
            ApiError::DatabaseError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {:#}", err),
            ),
        };

        if status.is_server_error() {
            tracing::error!("{}", error_message);
        }

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(invalid) = err.downcast_ref::<InvalidDocument>() {
            return ApiError::MalformedQuery(invalid.to_string());
        }
        match err.downcast_ref::<mongodb::error::Error>() {
            Some(driver_err) => classify(driver_err).unwrap_or(ApiError::DatabaseError(err)),
            None => ApiError::DatabaseError(err),
        }
    }
}

fn is_malformed_query_code(code: i32) -> bool {
    MALFORMED_QUERY_CODES.contains(&code)
}

/// Maps a driver error onto a client-facing variant, if it has one.
fn classify(err: &mongodb::error::Error) -> Option<ApiError> {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. } => Some(ApiError::StoreUnavailable(err.to_string())),
        ErrorKind::InvalidArgument { .. } | ErrorKind::BsonSerialization(_) => {
            Some(ApiError::MalformedQuery(err.to_string()))
        }
        ErrorKind::Command(command_err) if is_malformed_query_code(command_err.code) => {
            Some(ApiError::MalformedQuery(command_err.message.clone()))
        }
        ErrorKind::Write(WriteFailure::WriteError(write_err))
            if is_malformed_query_code(write_err.code) =>
        {
            Some(ApiError::MalformedQuery(write_err.message.clone()))
        }
        _ => None,
    }
}
