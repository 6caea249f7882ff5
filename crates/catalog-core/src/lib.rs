//! catalog-core - Core types and traits for the product catalog
//!
//! This crate provides the product record, the validation of raw
//! submissions, and the `ProductStore` abstraction that persistence
//! backends (MongoDB, in-memory) implement.

pub mod error;
pub mod memory;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult, ValidationError};
pub use memory::MemoryStore;
pub use models::{NewProduct, PriceInput, Product, ProductForm};
pub use store::ProductStore;
