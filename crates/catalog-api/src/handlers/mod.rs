//! HTTP request handlers for the catalog API
//!
//! These handlers use the ProductStore trait and are backend-agnostic.

pub mod products;
