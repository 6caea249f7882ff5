//! Product record and submission types

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A persisted product, as returned by `GET /items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub shopkeeper: String,
    pub location: String,
    /// Server-relative path of the uploaded image (`/uploads/...`), if any
    pub image: Option<String>,
}

impl Product {
    /// Build a stored product from a validated submission and its assigned id
    pub fn from_new(id: impl Into<String>, new: NewProduct) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            price: new.price,
            category: new.category,
            shopkeeper: new.shopkeeper,
            location: new.location,
            image: new.image,
        }
    }
}

/// A validated product that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub shopkeeper: String,
    pub location: String,
    pub image: Option<String>,
}

impl NewProduct {
    /// Attach the stored image path
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

/// Price as submitted: a JSON number, or text from a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

/// Raw product submission. Every field is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<PriceInput>,
    pub category: Option<String>,
    pub shopkeeper: Option<String>,
    pub location: Option<String>,
}

impl ProductForm {
    /// Set a text field by its form name. Unknown names are ignored.
    ///
    /// Returns `true` if the name was a product field.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "name" => self.name = Some(value),
            "price" => self.price = Some(PriceInput::Text(value)),
            "category" => self.category = Some(value),
            "shopkeeper" => self.shopkeeper = Some(value),
            "location" => self.location = Some(value),
            _ => return false,
        }
        true
    }

    /// Check presence and type of every required field.
    ///
    /// Text fields must contain something other than whitespace and are kept
    /// exactly as submitted. Price must parse as a finite number; zero and
    /// negative values are valid product states.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = required_text(&self.name, "name")?;
        let price = required_price(&self.price)?;
        let category = required_text(&self.category, "category")?;
        let shopkeeper = required_text(&self.shopkeeper, "shopkeeper")?;
        let location = required_text(&self.location, "location")?;

        Ok(NewProduct {
            name,
            price,
            category,
            shopkeeper,
            location,
            image: None,
        })
    }
}

fn required_text(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn required_price(value: &Option<PriceInput>) -> Result<f64, ValidationError> {
    let price = match value {
        None => return Err(ValidationError::MissingField("price")),
        Some(PriceInput::Number(n)) => *n,
        Some(PriceInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::MissingField("price"));
            }
            text.parse::<f64>()
                .map_err(|_| ValidationError::InvalidPrice(text.to_string()))?
        }
    };

    if !price.is_finite() {
        return Err(ValidationError::InvalidPrice(price.to_string()));
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete_form() -> ProductForm {
        ProductForm {
            name: Some("Lamp".into()),
            price: Some(PriceInput::Text("12.50".into())),
            category: Some("Home".into()),
            shopkeeper: Some("Ada".into()),
            location: Some("Market St".into()),
        }
    }

    #[test]
    fn test_validate_complete_form() {
        let product = complete_form().validate().unwrap();
        assert_eq!(
            product,
            NewProduct {
                name: "Lamp".into(),
                price: 12.5,
                category: "Home".into(),
                shopkeeper: "Ada".into(),
                location: "Market St".into(),
                image: None,
            }
        );
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        let cases: [(&str, fn(&mut ProductForm)); 5] = [
            ("name", |f| f.name = None),
            ("price", |f| f.price = None),
            ("category", |f| f.category = None),
            ("shopkeeper", |f| f.shopkeeper = None),
            ("location", |f| f.location = None),
        ];

        for (field, clear) in cases {
            let mut form = complete_form();
            clear(&mut form);
            assert_eq!(
                form.validate(),
                Err(ValidationError::MissingField(field)),
                "field {}",
                field
            );
        }
    }

    #[test]
    fn test_blank_text_is_missing() {
        let mut form = complete_form();
        form.shopkeeper = Some("   ".into());
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("shopkeeper"))
        );

        let mut form = complete_form();
        form.price = Some(PriceInput::Text(String::new()));
        assert_eq!(form.validate(), Err(ValidationError::MissingField("price")));
    }

    #[test]
    fn test_zero_price_is_accepted() {
        let mut form = complete_form();
        form.price = Some(PriceInput::Text("0".into()));
        assert_eq!(form.validate().unwrap().price, 0.0);

        form.price = Some(PriceInput::Number(0.0));
        assert_eq!(form.validate().unwrap().price, 0.0);
    }

    #[test]
    fn test_invalid_price() {
        let mut form = complete_form();
        form.price = Some(PriceInput::Text("cheap".into()));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidPrice(_))
        ));

        form.price = Some(PriceInput::Text("NaN".into()));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidPrice(_))
        ));

        form.price = Some(PriceInput::Text("inf".into()));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_negative_price_is_accepted() {
        let mut form = complete_form();
        form.price = Some(PriceInput::Text("-3".into()));
        assert_eq!(form.validate().unwrap().price, -3.0);

        form.price = Some(PriceInput::Number(-1.5));
        assert_eq!(form.validate().unwrap().price, -1.5);
    }

    #[test]
    fn test_text_values_are_kept_as_submitted() {
        let mut form = complete_form();
        form.name = Some("  Lamp \n".into());
        form.location = Some(" Market St".into());
        form.price = Some(PriceInput::Text(" 3 ".into()));
        let product = form.validate().unwrap();
        assert_eq!(product.name, "  Lamp \n");
        assert_eq!(product.location, " Market St");
        assert_eq!(product.price, 3.0);
    }

    #[test]
    fn test_set_field() {
        let mut form = ProductForm::default();
        assert!(form.set_field("price", "9".into()));
        assert!(form.set_field("location", "Dock 4".into()));
        assert!(!form.set_field("image_caption", "ignored".into()));
        assert_eq!(form.price, Some(PriceInput::Text("9".into())));
        assert_eq!(form.location.as_deref(), Some("Dock 4"));
    }

    #[test]
    fn test_price_input_from_json() {
        let form: ProductForm =
            serde_json::from_str(r#"{"name":"Cup","price":4.25,"category":"Kitchen"}"#).unwrap();
        assert_eq!(form.price, Some(PriceInput::Number(4.25)));

        let form: ProductForm = serde_json::from_str(r#"{"price":"4.25"}"#).unwrap();
        assert_eq!(form.price, Some(PriceInput::Text("4.25".into())));
    }

    #[test]
    fn test_product_serializes_null_image() {
        let new = complete_form().validate().unwrap();
        let product = Product::from_new("abc123", new);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["_id"], "abc123");
        assert_eq!(json["image"], serde_json::Value::Null);
        assert_eq!(json["price"], 12.5);
    }
}
