//! Catalog HTTP client implementation

use std::time::Duration;

use catalog_core::Product;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{CatalogClientError, Result};
use crate::types::ProductSubmission;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog REST API client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the catalog server (e.g., "http://localhost:3000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new catalog client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;
        self.handle_text(response).await
    }

    /// List every stored product
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Product>> {
        let url = self.base_url.join("/items")?;
        debug!("Listing products from {}", url);

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Submit a product as `multipart/form-data`, the way the HTML form does.
    ///
    /// Returns the confirmation HTML.
    #[instrument(skip(self, submission), fields(name = %submission.name))]
    pub async fn create_product(&self, submission: &ProductSubmission) -> Result<String> {
        let url = self.base_url.join("/products")?;

        let mut form = Form::new();
        for (name, value) in submission.fields() {
            form = form.text(name, value.to_string());
        }

        if let Some(image) = &submission.image {
            let mut part = Part::bytes(image.data.clone()).file_name(image.file_name.clone());
            if let Some(mime) = &image.mime {
                part = part
                    .mime_str(mime)
                    .map_err(|e| CatalogClientError::ParseError(format!("Invalid MIME type: {}", e)))?;
            }
            form = form.part("image", part);
        }

        let response = self.client.post(url).multipart(form).send().await?;
        self.handle_text(response).await
    }

    /// Submit a product as `application/x-www-form-urlencoded`. Any image is ignored.
    #[instrument(skip(self, submission), fields(name = %submission.name))]
    pub async fn create_product_form(&self, submission: &ProductSubmission) -> Result<String> {
        let url = self.base_url.join("/products")?;
        let response = self
            .client
            .post(url)
            .form(&submission.fields()[..])
            .send()
            .await?;
        self.handle_text(response).await
    }

    /// Submit an arbitrary JSON body to `/products`
    #[instrument(skip(self, body))]
    pub async fn create_product_json(&self, body: &serde_json::Value) -> Result<String> {
        let url = self.base_url.join("/products")?;
        let response = self.client.post(url).json(body).send().await?;
        self.handle_text(response).await
    }

    /// Fetch a static file (e.g. an uploaded image path from `Product::image`)
    #[instrument(skip(self))]
    pub async fn fetch_file(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.base_url.join(path)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    /// Handle a JSON response
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CatalogClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    /// Handle a text/HTML response
    async fn handle_text(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    /// Error bodies are plain text
    async fn extract_error(&self, response: reqwest::Response, status: StatusCode) -> CatalogClientError {
        let message = match response.text().await {
            Ok(text) if !text.is_empty() => text,
            _ => format!("HTTP {}", status),
        };
        CatalogClientError::server_error(status.as_u16(), message)
    }
}
