use crate::store::MongoStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: MongoStore,
}
