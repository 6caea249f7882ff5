//! Request types for the catalog client

/// An image attached to a product submission
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name reported to the server
    pub file_name: String,
    pub data: Vec<u8>,
    /// MIME type of the part (defaults to `application/octet-stream`)
    pub mime: Option<String>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Product fields as sent by the submission form.
///
/// Price is kept as text so callers can submit exactly what a browser would,
/// including empty or malformed values.
#[derive(Debug, Clone, Default)]
pub struct ProductSubmission {
    pub name: String,
    pub price: String,
    pub category: String,
    pub shopkeeper: String,
    pub location: String,
    pub image: Option<ImageUpload>,
}

impl ProductSubmission {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        category: impl Into<String>,
        shopkeeper: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            category: category.into(),
            shopkeeper: shopkeeper.into(),
            location: location.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Text fields as (form name, value) pairs, in form order
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("name", self.name.as_str()),
            ("price", self.price.as_str()),
            ("category", self.category.as_str()),
            ("shopkeeper", self.shopkeeper.as_str()),
            ("location", self.location.as_str()),
        ]
    }
}
