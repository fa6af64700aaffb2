//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use kumquat_core::{Price, ProductId};

use crate::db::{RepositoryError, products::ProductRepository};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Request for creating a product.
///
/// `price` deserializes through the validated `Price` type, so negative
/// amounts are rejected at the boundary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Price,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Request for partially updating a product. Absent fields are left as-is.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Create a new product.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = ProductRepository::new(state.pool())
        .create(&body.name, body.price, &body.description, body.image.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// List all products.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(Json(products))
}

/// Get a product by id.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no product with id {id}")))?;

    Ok(Json(product))
}

/// Merge the given fields into a product.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .update(
            id,
            body.name.as_deref(),
            body.price,
            body.description.as_deref(),
            body.image.as_deref(),
        )
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("no product with id {id}")),
            other => AppError::Database(other),
        })?;

    Ok(Json(product))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("no product with id {id}")));
    }

    Ok(Json(MessageResponse::new("product deleted")))
}
