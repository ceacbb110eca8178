use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{Product, ProductFields, ProductListing},
};

/// Inserts a new product. A freshly created product is never purchasable,
/// whatever the submission claimed.
pub async fn insert_product(
    pool: &PgPool,
    fields: &ProductFields,
    file_path: &str,
    image_path: &str,
) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price_in_cents, file_path, image_path, is_available_for_purchase)
         VALUES ($1, $2, $3, $4, $5, FALSE)
         RETURNING *",
    )
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.price_in_cents)
    .bind(file_path)
    .bind(image_path)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

/// Persists the scalar fields plus the (possibly retained) blob paths.
/// Availability is untouched by edits.
pub async fn update_product(
    pool: &PgPool,
    id: Uuid,
    fields: &ProductFields,
    file_path: &str,
    image_path: &str,
) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products
         SET name = $1, description = $2, price_in_cents = $3, file_path = $4, image_path = $5,
             updated_at = NOW()
         WHERE id = $6
         RETURNING *",
    )
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.price_in_cents)
    .bind(file_path)
    .bind(image_path)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn set_availability(
    pool: &PgPool,
    id: Uuid,
    is_available_for_purchase: bool,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET is_available_for_purchase = $1, updated_at = NOW()
         WHERE id = $2 RETURNING *",
    )
    .bind(is_available_for_purchase)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// Removes the row and hands back what was deleted so the caller can clean
/// up the associated blobs. `None` means no row matched.
pub async fn delete_product(pool: &PgPool, id: Uuid) -> Result<Option<Product>> {
    let result = sqlx::query_as::<_, Product>("DELETE FROM products WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await;

    match result {
        Ok(product) => Ok(product),
        // 23503: foreign_key_violation — orders still reference the product
        Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23503") => Err(
            AppError::Conflict("Product has orders and cannot be deleted".to_string()),
        ),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_with_order_counts(pool: &PgPool) -> Result<Vec<ProductListing>> {
    let products = sqlx::query_as::<_, ProductListing>(
        "SELECT p.id, p.name, p.price_in_cents, p.is_available_for_purchase,
                COUNT(o.id) AS order_count
         FROM products p
         LEFT JOIN orders o ON o.product_id = p.id
         GROUP BY p.id
         ORDER BY p.name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// (active, inactive) product counts for the dashboard.
pub async fn count_by_availability(pool: &PgPool) -> Result<(i64, i64)> {
    let counts = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*) FILTER (WHERE is_available_for_purchase),
                COUNT(*) FILTER (WHERE NOT is_available_for_purchase)
         FROM products",
    )
    .fetch_one(pool)
    .await?;

    Ok(counts)
}
