//! In-memory product store
//!
//! Used for demo mode (`catalogd --memory`) and as the store behind the
//! integration tests.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewProduct, Product};
use crate::store::ProductStore;

/// Product store backed by a vector behind a read-write lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    /// When set, every operation fails with a connection error
    unavailable: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent operations fail as if the database were unreachable
    pub fn set_unavailable(&self, reason: impl Into<String>) {
        *self.unavailable.write() = Some(reason.into());
    }

    /// Restore normal operation after `set_unavailable`
    pub fn set_available(&self) {
        *self.unavailable.write() = None;
    }

    /// Number of stored products
    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    fn check_available(&self) -> StoreResult<()> {
        match self.unavailable.read().as_ref() {
            Some(reason) => Err(StoreError::Connection(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        self.check_available()?;

        let id = uuid::Uuid::new_v4().simple().to_string();
        let product = Product::from_new(id, product);
        self.products.write().push(product.clone());

        tracing::debug!(id = %product.id, "Stored product in memory");
        Ok(product)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        self.check_available()?;
        Ok(self.products.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> NewProduct {
        NewProduct {
            name: "Lamp".into(),
            price: 10.0,
            category: "Home".into(),
            shopkeeper: "Ada".into(),
            location: "Market St".into(),
            image: Some("/uploads/1-lamp.png".into()),
        }
    }

    #[tokio::test]
    async fn test_create_then_find_all() {
        let store = MemoryStore::new();
        assert!(store.find_all().await.unwrap().is_empty());

        let created = store.create(lamp()).await.unwrap();
        assert_eq!(created.name, "Lamp");
        assert_eq!(created.image.as_deref(), Some("/uploads/1-lamp.png"));
        assert!(!created.id.is_empty());

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = MemoryStore::new();
        let a = store.create(lamp()).await.unwrap();
        let b = store.create(lamp()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_store_rejects_operations() {
        let store = MemoryStore::new();
        store.set_unavailable("connection refused");

        assert!(matches!(
            store.create(lamp()).await,
            Err(StoreError::Connection(_))
        ));
        assert!(matches!(
            store.find_all().await,
            Err(StoreError::Connection(_))
        ));
        assert!(store.is_empty());

        store.set_available();
        store.create(lamp()).await.unwrap();
        assert_eq!(store.len(), 1);
    }
}
