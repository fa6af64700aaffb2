//! HTTP route handlers for the shop API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database)
//!
//! # Products
//! POST   /products              - Create product
//! GET    /products              - List products
//! GET    /products/{id}         - Get product
//! PATCH  /products/{id}         - Partial update
//! DELETE /products/{id}         - Delete product
//!
//! # Accounts
//! POST /register                - Register (email + password)
//! POST /login                   - Login, returns the user record
//! POST /change-password         - Change password (old password required)
//!
//! # Cart
//! POST   /cart                  - Add item (creates the cart if absent)
//! GET    /cart                  - View cart with products and total
//! PUT    /cart/{productId}      - Overwrite line quantity
//! DELETE /cart/{productId}      - Remove line
//! POST   /checkout              - Delete the cart(s)
//! ```
//!
//! Cart routes accept an optional owner (`userId` in the body, or as a
//! query parameter on GET/DELETE). Without one they operate on the shared
//! cart, the upstream service's single global cart.

pub mod account;
pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Serialize;

use crate::state::AppState;

/// Plain message response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create).get(products::index))
        .route(
            "/{id}",
            get(products::show)
                .patch(products::update)
                .delete(products::remove),
        )
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/change-password", post(account::change_password))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::add).get(cart::show))
        .route("/{product_id}", put(cart::update).delete(cart::remove))
}

/// Create all routes for the shop API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Account routes (at the root, not nested)
        .merge(account_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout stands alone
        .route("/checkout", post(cart::checkout))
}
