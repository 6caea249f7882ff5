//! Product submission and listing handlers

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::{Form, Json};
use catalog_core::{Product, ProductForm};

use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::StoredUpload;

/// Multipart field carrying the product image
pub const IMAGE_FIELD: &str = "image";

/// Body returned after a product is stored
pub const CONFIRMATION_HTML: &str =
    r#"<h1>Product Added Successfully!</h1><a href="/">Add Another Product</a>"#;

/// POST /products
/// Store a product submitted as multipart, urlencoded, or JSON.
/// Any other body carries no fields and is rejected as incomplete.
pub async fn create_product(
    State(state): State<AppState>,
    request: Request,
) -> Result<Html<&'static str>, ApiError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let (form, image) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        read_multipart(&state, multipart).await?
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<ProductForm>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        (form, None)
    } else if content_type.starts_with("application/json") {
        let Json(form) = Json::<ProductForm>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        (form, None)
    } else {
        // No fields can be read from this body; validation reports them missing
        tracing::debug!(content_type = %content_type, "Submission without a form body");
        (ProductForm::default(), None)
    };

    let product = form
        .validate()?
        .with_image(image.map(|upload| upload.url_path));

    let created = state.store().create(product).await.map_err(|e| {
        tracing::error!(error = %e, backend = state.store().backend_name(), "Error saving product");
        ApiError::Internal("Database error".to_string())
    })?;

    tracing::info!(
        id = %created.id,
        name = %created.name,
        image = created.image.as_deref().unwrap_or("-"),
        "Product created"
    );

    Ok(Html(CONFIRMATION_HTML))
}

/// GET /items
/// List every stored product
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.store().find_all().await.map_err(|e| {
        tracing::error!(error = %e, backend = state.store().backend_name(), "Error fetching products");
        ApiError::Internal("Error fetching products from the database".to_string())
    })?;

    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Collect text fields into a form and write the image part, if any, to disk.
///
/// The file is written as soon as its part is read, before the text fields
/// are validated; a rejected submission leaves it on disk.
async fn read_multipart(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(ProductForm, Option<StoredUpload>), ApiError> {
    let mut form = ProductForm::default();
    let mut image: Option<StoredUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;

            // Browsers send an empty, unnamed part when no file was chosen
            let Some(file_name) = file_name.filter(|n| !n.is_empty() || !data.is_empty()) else {
                continue;
            };

            if image.is_some() {
                return Err(ApiError::BadRequest(
                    "Only one image may be uploaded".to_string(),
                ));
            }
            image = Some(state.uploads().save(&file_name, &data).await?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            if !form.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok((form, image))
}
