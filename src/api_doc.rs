use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, ReadinessResponse};
use crate::handlers;
use crate::models::{
    ConnectionSpec, CreateRequest, DeleteRequest, ReadRequest, StatusResponse, UpdateRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "mongo-crud-api",
        version = "0.1.0",
        description = "JSON create/read/update/delete endpoints over MongoDB collections"
    ),
    paths(
        handlers::health::health_handler,
        handlers::health::ready_handler,
        handlers::create::create_handler,
        handlers::read::read_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            ConnectionSpec,
            CreateRequest,
            ReadRequest,
            UpdateRequest,
            DeleteRequest,
            StatusResponse,
            ErrorResponse,
            HealthResponse,
            ReadinessResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness checks"),
        (name = "documents", description = "Document operations")
    )
)]
pub struct ApiDoc;
