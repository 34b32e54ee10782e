// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const READY: &str = "/ready";
pub const CREATE: &str = "/create";
pub const READ: &str = "/read";
pub const UPDATE: &str = "/update";
pub const DELETE: &str = "/delete";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
