//! catalog-api - HTTP layer for the product catalog
//!
//! This crate provides the routes of the catalog service on top of the
//! `ProductStore` trait. It is backend-agnostic.
//!
//! # Usage
//!
//! ```ignore
//! use catalog_api::{create_router, AppState};
//! use catalog_core::MemoryStore;
//!
//! let state = AppState::new(Arc::new(MemoryStore::new()), "public");
//! state.uploads().ensure_dir().await?;
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;
pub mod upload;

pub use error::ApiError;
pub use state::AppState;
pub use upload::{StoredUpload, UploadError, UploadStore};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Static page served at `/`
pub const FORM_PAGE: &str = "form.html";

/// Create the catalog router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let form_page = ServeFile::new(state.public_dir().join(FORM_PAGE));
    let uploads = ServeDir::new(state.uploads().dir());
    let public = ServeDir::new(state.public_dir());
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes());

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Submission form
        .route_service("/", form_page)
        // Product routes
        .route("/products", post(handlers::products::create_product))
        .route("/items", get(handlers::products::list_items))
        // Uploaded images, then everything else in the public directory
        .nest_service(state::UPLOAD_URL_PREFIX, uploads)
        .fallback_service(public)
        // Middleware
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
