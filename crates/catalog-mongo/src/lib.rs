//! catalog-mongo - MongoDB implementation of `ProductStore`
//!
//! # Usage
//!
//! ```ignore
//! use catalog_mongo::{MongoConfig, MongoStore};
//!
//! let store = MongoStore::connect(&MongoConfig::new("mongodb://localhost:27017")).await?;
//! let state = AppState::new(Arc::new(store), uploads);
//! ```

mod document;
mod store;

pub use store::{MongoConfig, MongoStore};
