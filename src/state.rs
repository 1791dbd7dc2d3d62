//! Shared application state for all routes.

use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    /// The only handle to persistence; cloned per request.
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState { store }
    }
}
