//! Cart domain types.

use serde::Serialize;

use kumquat_core::{AccountId, CartId, ProductId, Quantity};

use super::Product;

/// A shopping cart.
///
/// `account_id` is `None` for the shared cart used when requests carry no
/// owner, mirroring the single global cart of the upstream service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning account, if the cart is owner-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Cart lines, at most one per product.
    pub items: Vec<CartItem>,
}

/// A cart line: a product reference and a unit count.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Referenced product.
    pub product_id: ProductId,
    /// Number of units, at least one.
    pub quantity: Quantity,
}

/// A cart line with the product reference expanded into the full record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDetail {
    /// The full product record.
    pub product: Product,
    /// Number of units, at least one.
    pub quantity: Quantity,
}
