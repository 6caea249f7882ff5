//! ProductStore trait - the persistence abstraction for the catalog

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{NewProduct, Product};

/// Persistence backend for products.
///
/// The HTTP layer only talks to this trait, so the same router serves a
/// MongoDB collection in production and an in-memory vector in tests.
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Short backend name for logs (e.g. "mongodb", "memory")
    fn backend_name(&self) -> &'static str;

    /// Insert a product and return the stored record with its assigned id
    async fn create(&self, product: NewProduct) -> StoreResult<Product>;

    /// Return every stored product. No ordering is guaranteed.
    async fn find_all(&self) -> StoreResult<Vec<Product>>;
}
