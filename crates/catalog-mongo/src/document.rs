//! BSON document shape of a product

use catalog_core::{NewProduct, Product};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A product as stored in the collection. Unknown fields (such as a
/// version key written by other clients) are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub shopkeeper: String,
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductDocument {
    pub fn from_new(id: ObjectId, product: NewProduct) -> Self {
        Self {
            id: Some(id),
            name: product.name,
            price: product.price,
            category: product.category,
            shopkeeper: product.shopkeeper,
            location: product.location,
            image: product.image,
        }
    }

    pub fn into_product(self) -> Product {
        Product {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: self.name,
            price: self.price,
            category: self.category,
            shopkeeper: self.shopkeeper,
            location: self.location,
            image: self.image,
        }
    }
}
