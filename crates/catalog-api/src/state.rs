//! Application state for the catalog API

use std::path::{Path, PathBuf};
use std::sync::Arc;

use catalog_core::ProductStore;

use crate::upload::UploadStore;

/// URL prefix uploaded files are served under
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Default request body limit for submissions (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Product persistence
    store: Arc<dyn ProductStore>,
    /// Writer for uploaded images
    uploads: Arc<UploadStore>,
    /// Directory served as static content (form page, uploads)
    public_dir: Arc<PathBuf>,
    /// Largest accepted request body
    max_upload_bytes: usize,
}

impl AppState {
    /// Create state serving `public_dir`, with uploads in `<public_dir>/uploads`
    pub fn new(store: Arc<dyn ProductStore>, public_dir: impl Into<PathBuf>) -> Self {
        let public_dir = public_dir.into();
        let uploads = UploadStore::new(public_dir.join("uploads"), UPLOAD_URL_PREFIX);

        Self {
            store,
            uploads: Arc::new(uploads),
            public_dir: Arc::new(public_dir),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Replace the upload store (e.g. to write outside the public directory)
    pub fn with_upload_store(mut self, uploads: UploadStore) -> Self {
        self.uploads = Arc::new(uploads);
        self
    }

    /// Set the request body limit
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Get the product store
    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }

    /// Get the upload store
    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
