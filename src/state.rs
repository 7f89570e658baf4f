//! Shared application state for all routes.

use crate::store::TriviaStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TriviaStore>,
}

impl AppState {
    pub fn new<S: TriviaStore + 'static>(store: S) -> Self {
        AppState { store: Arc::new(store) }
    }
}
