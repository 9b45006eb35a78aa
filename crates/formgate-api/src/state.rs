//! Shared application state injected into every handler.

use std::sync::Arc;

use formgate_db::{Database, UploadStore};

/// Per-request shared state: the bounded connection pool (inside
/// `Database`) and the upload store. Cloned per request; handlers hold no
/// other shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Create application state from a database handle and upload root.
    pub fn new(db: Database, uploads: UploadStore) -> Self {
        Self {
            db,
            uploads: Arc::new(uploads),
        }
    }
}
