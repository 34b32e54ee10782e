use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::error::MAX_BODY_BYTES;
use crate::handlers::{
    create_handler, delete_handler, health_handler, read_handler, ready_handler, update_handler,
};
use crate::routes;
use crate::state::AppState;

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .route(routes::READY, get(ready_handler))
        .route(routes::CREATE, post(create_handler))
        .route(routes::READ, get(read_handler))
        .route(routes::UPDATE, put(update_handler))
        .route(routes::DELETE, delete(delete_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
