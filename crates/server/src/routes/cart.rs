//! Cart route handlers.
//!
//! Every cart endpoint accepts an optional `userId` (body field, or query
//! parameter on GET/DELETE). Without one the handlers operate on the
//! shared cart.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kumquat_core::{AccountId, CartId, ProductId, Quantity};

use crate::error::{AppError, Result};
use crate::models::{Cart, CartItemDetail};
use crate::routes::MessageResponse;
use crate::services::CartService;
use crate::state::AppState;

/// Request for adding a product to the cart.
///
/// `quantity` defaults to one when absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default)]
    pub user_id: Option<AccountId>,
}

/// Request for overwriting a line quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub new_quantity: Quantity,
    #[serde(default)]
    pub user_id: Option<AccountId>,
}

/// Optional owner scope carried in the query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartScopeQuery {
    #[serde(default)]
    pub user_id: Option<AccountId>,
}

/// Request body for checkout. The body itself is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub user_id: Option<AccountId>,
}

/// A cart with expanded product records, as returned by the view endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDetailView {
    pub id: CartId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    pub items: Vec<CartItemDetail>,
}

/// Response for the cart view endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCartResponse {
    pub cart: CartDetailView,
    pub total_price: Decimal,
}

/// Add units of a product to the cart, creating the cart if needed.
///
/// # Errors
///
/// Returns 400 if the product doesn't exist.
pub async fn add(State(state): State<AppState>, Json(body): Json<AddItemRequest>) -> Result<Json<Cart>> {
    let cart = CartService::new(state.pool())
        .add_item(body.user_id, body.product_id, body.quantity)
        .await?;

    Ok(Json(cart))
}

/// Overwrite the quantity of a product already in the cart.
///
/// # Errors
///
/// Returns 404 if the cart doesn't exist or the product is not in it.
pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Json(body): Json<SetQuantityRequest>,
) -> Result<Json<Cart>> {
    let cart = CartService::new(state.pool())
        .set_quantity(body.user_id, product_id, body.new_quantity)
        .await?;

    Ok(Json(cart))
}

/// View the cart with product references expanded and the total computed.
///
/// # Errors
///
/// Returns 404 if the cart doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Query(scope): Query<CartScopeQuery>,
) -> Result<Json<ViewCartResponse>> {
    let contents = CartService::new(state.pool()).view(scope.user_id).await?;

    Ok(Json(ViewCartResponse {
        cart: CartDetailView {
            id: contents.id,
            account_id: contents.account_id,
            items: contents.items,
        },
        total_price: contents.total,
    }))
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns 404 if the cart doesn't exist or the product is not in it.
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Query(scope): Query<CartScopeQuery>,
) -> Result<Json<MessageResponse>> {
    CartService::new(state.pool())
        .remove_item(scope.user_id, product_id)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "removed product {product_id} from the cart"
    ))))
}

/// Check out: delete the scoped cart, or every cart when no owner is given.
///
/// The body is optional; an empty body checks out the shared cart.
///
/// # Errors
///
/// Returns 400 if a body is present but not valid JSON.
pub async fn checkout(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<MessageResponse>> {
    let owner = if body.trim().is_empty() {
        None
    } else {
        let request: CheckoutRequest = serde_json::from_str(&body)
            .map_err(|e| AppError::BadRequest(format!("invalid checkout body: {e}")))?;
        request.user_id
    };

    let deleted = CartService::new(state.pool()).checkout(owner).await?;

    tracing::info!(carts_deleted = deleted, "checkout complete");

    Ok(Json(MessageResponse::new("checkout complete")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_quantity_defaults_to_one() {
        let body = r#"{"productId":3}"#;
        let parsed: AddItemRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.quantity, Quantity::ONE);
        assert!(parsed.user_id.is_none());
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let body = r#"{"productId":3,"quantity":0}"#;
        let parsed: std::result::Result<AddItemRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_set_quantity_field_name() {
        let body = r#"{"newQuantity":5,"userId":2}"#;
        let parsed: SetQuantityRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.new_quantity.as_i32(), 5);
        assert_eq!(parsed.user_id, Some(AccountId::new(2)));
    }
}
