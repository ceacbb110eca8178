use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{AvailabilityUpdate, Product, ProductListing},
    queries::product_queries,
    utils::forms,
    AppState,
};

const PRODUCT_LISTING: &str = "/admin/products";

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductListing>>> {
    let products = product_queries::list_with_order_counts(&state.db).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = forms::read_product_form(multipart).await?;
    let fields = form.validate(true).map_err(AppError::Validation)?;

    let (Some(file), Some(image)) = (form.file_replacement(), form.image_replacement()) else {
        // validate(true) already rejected absent uploads
        return Err(AppError::InternalError(
            "Uploads missing after validation".to_string(),
        ));
    };

    let file_path = state.storage.store_file(&file.file_name, &file.data).await?;
    let image_path = state.storage.store_image(&image.file_name, &image.data).await?;

    let product =
        product_queries::insert_product(&state.db, &fields, &file_path, &image_path).await?;

    tracing::info!("Created product {}", product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, PRODUCT_LISTING)],
        Json(product),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = forms::read_product_form(multipart).await?;
    let fields = form.validate(false).map_err(AppError::Validation)?;

    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    // Replace-or-retain, independently per blob. The old blob goes away
    // before the new key is written; the row update stays the last step.
    let mut file_path = product.file_path.clone();
    if let Some(file) = form.file_replacement() {
        state.storage.delete_file(&product.file_path).await?;
        file_path = state.storage.store_file(&file.file_name, &file.data).await?;
    }

    let mut image_path = product.image_path.clone();
    if let Some(image) = form.image_replacement() {
        state.storage.delete_image(&product.image_path).await?;
        image_path = state.storage.store_image(&image.file_name, &image.data).await?;
    }

    let updated =
        product_queries::update_product(&state.db, id, &fields, &file_path, &image_path).await?;

    tracing::info!("Updated product {}", updated.id);

    Ok(([(header::LOCATION, PRODUCT_LISTING)], Json(updated)))
}

pub async fn set_product_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AvailabilityUpdate>,
) -> Result<StatusCode> {
    product_queries::set_availability(&state.db, id, payload.is_available_for_purchase)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    // The row delete is the authoritative existence check.
    let product = product_queries::delete_product(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    // Best effort: the row is already gone, so blob failures are only logged.
    if let Err(e) = state.storage.delete_file(&product.file_path).await {
        tracing::warn!("Failed to delete file blob {}: {}", product.file_path, e);
    }
    if let Err(e) = state.storage.delete_image(&product.image_path).await {
        tracing::warn!("Failed to delete image blob {}: {}", product.image_path, e);
    }

    tracing::info!("Deleted product {}", id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn download_product_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let data = state.storage.read_file(&product.file_path).await?;
    let filename = original_filename(&product.file_path);

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        data,
    ))
}

/// Stored keys look like `{uuid}-{original filename}`; a UUID is 36 chars,
/// so the original name starts at byte 37 of the basename.
fn original_filename(file_path: &str) -> String {
    let base = FsPath::new(file_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    base.get(37..).map(str::to_string).unwrap_or(base)
}
