//! MongoStore - product persistence in a MongoDB collection

use async_trait::async_trait;
use catalog_core::{NewProduct, Product, ProductStore, StoreError, StoreResult};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::document::ProductDocument;

/// Default database name
pub const DEFAULT_DATABASE: &str = "catalog";
/// Default collection name
pub const DEFAULT_COLLECTION: &str = "products";

/// Connection settings for the MongoDB store
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string, e.g. "mongodb://localhost:27017"
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl MongoConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

/// Product store backed by a single MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<ProductDocument>,
}

impl MongoStore {
    /// Connect and verify the server answers a ping.
    ///
    /// Fails if the URI is malformed or the server is unreachable, so the
    /// caller can refuse to start instead of serving a store that rejects
    /// every operation.
    pub async fn connect(config: &MongoConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(format!("Invalid MongoDB URI: {}", e)))?;
        options.app_name = Some("catalogd".to_string());

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Connection(format!("Client error: {}", e)))?;
        let database = client.database(&config.database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(format!("Ping failed: {}", e)))?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );

        Ok(Self {
            collection: database.collection::<ProductDocument>(&config.collection),
        })
    }
}

#[async_trait]
impl ProductStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let document = ProductDocument::from_new(ObjectId::new(), product);

        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        let product = document.into_product();
        tracing::debug!(id = %product.id, "Inserted product document");
        Ok(product)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Query(format!("Find error: {}", e)))?;

        let documents: Vec<ProductDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(format!("Cursor error: {}", e)))?;

        Ok(documents
            .into_iter()
            .map(ProductDocument::into_product)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.database, "catalog");
        assert_eq!(config.collection, "products");

        let config = config.with_database("shop").with_collection("items");
        assert_eq!(config.database, "shop");
        assert_eq!(config.collection, "items");
    }

    #[tokio::test]
    async fn test_malformed_uri_fails_fast() {
        let result = MongoStore::connect(&MongoConfig::new("not-a-mongo-uri")).await;
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    /// Requires a running server: `MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored`
    #[tokio::test]
    #[ignore]
    async fn test_create_and_find_all_live() {
        let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
        let collection = format!("products_test_{}", ObjectId::new().to_hex());
        let config = MongoConfig::new(uri).with_collection(collection);
        let store = MongoStore::connect(&config).await.unwrap();

        let created = store
            .create(NewProduct {
                name: "Lamp".into(),
                price: 0.0,
                category: "Home".into(),
                shopkeeper: "Ada".into(),
                location: "Market St".into(),
                image: None,
            })
            .await
            .unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![created]);

        store.collection.drop().await.unwrap();
    }
}
