//! Catalog Client Library
//!
//! Provides a typed HTTP client for the product catalog service.
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_client::{CatalogClient, ImageUpload, ProductSubmission};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new("http://localhost:3000")?;
//!
//!     let lamp = ProductSubmission::new("Lamp", "12.50", "Home", "Ada", "Market St")
//!         .with_image(ImageUpload::new("lamp.png", std::fs::read("lamp.png")?));
//!     client.create_product(&lamp).await?;
//!
//!     for product in client.list_items().await? {
//!         println!("{} {}", product.name, product.price);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogClientError, Result};
pub use types::{ImageUpload, ProductSubmission};

// Re-export core types for convenience
pub use catalog_core::Product;
