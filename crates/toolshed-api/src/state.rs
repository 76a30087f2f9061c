//! Shared handler state

use std::sync::Arc;
use toolshed_core::Storage;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    /// Catalog backend
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    /// State over any storage backend
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}
