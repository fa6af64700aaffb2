//! Cart service.
//!
//! Cart operations for an owner scope: `None` is the shared cart, `Some`
//! an account's own cart. Adding to a missing cart creates it; checkout
//! without an owner deletes every cart, matching the upstream service.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use kumquat_core::{AccountId, CartId, ProductId, Quantity};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::models::{Cart, CartItemDetail};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart exists for the requested owner scope.
    #[error("cart does not exist")]
    CartNotFound,

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// The product does not exist in the catalog.
    #[error("no product with id {0}")]
    UnknownProduct(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A cart with expanded products and its computed total.
#[derive(Debug)]
pub struct CartContents {
    /// Cart ID.
    pub id: CartId,
    /// Owning account, if any.
    pub account_id: Option<AccountId>,
    /// Lines with full product records.
    pub items: Vec<CartItemDetail>,
    /// Sum of quantity times unit price over all lines.
    pub total: Decimal,
}

/// Sum of quantity times unit price over all lines.
fn compute_total(items: &[CartItemDetail]) -> Decimal {
    items
        .iter()
        .map(|item| item.product.price.line_total(item.quantity.as_i32()))
        .sum()
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
        }
    }

    /// Add units of a product to the owner's cart, creating the cart if
    /// needed. Quantities accumulate onto an existing line for the same
    /// product; a product never occupies two lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if the product doesn't exist.
    pub async fn add_item(
        &self,
        owner: Option<AccountId>,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Cart, CartError> {
        let cart = self.carts.find_or_create(owner).await?;

        self.carts
            .upsert_item(cart.id, product_id, quantity)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => CartError::UnknownProduct(product_id),
                other => CartError::Repository(other),
            })?;

        self.reload(owner).await
    }

    /// Overwrite the quantity of a product already in the owner's cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if no cart exists for the scope.
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    pub async fn set_quantity(
        &self,
        owner: Option<AccountId>,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Cart, CartError> {
        let cart = self.carts.find(owner).await?.ok_or(CartError::CartNotFound)?;

        let updated = self
            .carts
            .set_item_quantity(cart.id, product_id, quantity)
            .await?;
        if !updated {
            return Err(CartError::ItemNotFound(product_id));
        }

        self.reload(owner).await
    }

    /// Remove a product from the owner's cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if no cart exists for the scope.
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    pub async fn remove_item(
        &self,
        owner: Option<AccountId>,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        let cart = self.carts.find(owner).await?.ok_or(CartError::CartNotFound)?;

        let removed = self.carts.delete_item(cart.id, product_id).await?;
        if !removed {
            return Err(CartError::ItemNotFound(product_id));
        }

        self.reload(owner).await
    }

    /// View the owner's cart with product references expanded and the
    /// total computed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if no cart exists for the scope.
    pub async fn view(&self, owner: Option<AccountId>) -> Result<CartContents, CartError> {
        let cart = self.carts.find(owner).await?.ok_or(CartError::CartNotFound)?;

        let items = self.carts.items_with_products(cart.id).await?;
        let total = compute_total(&items);

        Ok(CartContents {
            id: cart.id,
            account_id: cart.account_id,
            items,
            total,
        })
    }

    /// Check out: delete the owner's cart, or every cart when no owner is
    /// given. No order record is created.
    ///
    /// # Returns
    ///
    /// Returns the number of carts deleted.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the database operation fails.
    pub async fn checkout(&self, owner: Option<AccountId>) -> Result<u64, CartError> {
        match owner {
            Some(_) => {
                let Some(cart) = self.carts.find(owner).await? else {
                    return Ok(0);
                };
                let deleted = self.carts.delete(cart.id).await?;
                Ok(u64::from(deleted))
            }
            None => Ok(self.carts.delete_all().await?),
        }
    }

    async fn reload(&self, owner: Option<AccountId>) -> Result<Cart, CartError> {
        self.carts
            .find(owner)
            .await?
            .ok_or(CartError::CartNotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kumquat_core::Price;
    use rust_decimal::dec;

    use crate::models::Product;

    fn detail(id: i32, price: Decimal, quantity: i32) -> CartItemDetail {
        let now = Utc::now();
        CartItemDetail {
            product: Product {
                id: ProductId::new(id),
                name: format!("product-{id}"),
                price: Price::new(price).unwrap(),
                description: String::new(),
                image: None,
                created_at: now,
                updated_at: now,
            },
            quantity: Quantity::new(quantity).unwrap(),
        }
    }

    #[test]
    fn test_compute_total_empty() {
        assert_eq!(compute_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_compute_total_sums_line_totals() {
        let items = vec![detail(1, dec!(2.50), 4), detail(2, dec!(19.99), 1)];
        assert_eq!(compute_total(&items), dec!(29.99));
    }

    #[test]
    fn test_compute_total_decimal_precision() {
        // 3 x 0.10 is exactly 0.30 in decimal arithmetic
        let items = vec![detail(1, dec!(0.10), 3)];
        assert_eq!(compute_total(&items), dec!(0.30));
    }
}
