use crate::storage::FileStorage;
use crate::store::SqliteStore;
use std::sync::Arc;

/// Handles shared by every request handler.
///
/// Built once in `main.rs` and registered as `web::Data`. The store and the
/// storage are reference counted, so cloning the state into a blocking task is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub storage: Arc<dyn FileStorage>,
    /// Largest ID card photo accepted from a client form, in bytes.
    pub max_photo_bytes: usize,
}

impl AppState {
    pub fn new(
        store: SqliteStore,
        storage: impl FileStorage + 'static,
        max_photo_bytes: usize,
    ) -> Self {
        Self {
            store: Arc::new(store),
            storage: Arc::new(storage),
            max_photo_bytes,
        }
    }
}
