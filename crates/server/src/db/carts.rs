//! Cart repository for database operations.
//!
//! Cart identity is an owner scope: `Some(account_id)` selects that
//! account's cart, `None` selects the shared cart (`account_id IS NULL`).
//! Item mutations are single statements, so concurrent adds to the same
//! cart both land instead of racing a read-then-write.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kumquat_core::{AccountId, CartId, Price, ProductId, Quantity};

use super::RepositoryError;
use crate::models::{Cart, CartItem, CartItemDetail, Product};

/// Database row for a cart.
#[derive(sqlx::FromRow)]
struct CartRow {
    id: i32,
    account_id: Option<i32>,
}

/// Database row for a cart line.
#[derive(sqlx::FromRow)]
struct CartItemRow {
    product_id: i32,
    quantity: i32,
}

impl CartItemRow {
    fn into_item(self) -> Result<CartItem, RepositoryError> {
        let quantity = Quantity::new(self.quantity).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid quantity in database: {e}"))
        })?;

        Ok(CartItem {
            product_id: ProductId::new(self.product_id),
            quantity,
        })
    }
}

/// Database row for a cart line joined to its product.
#[derive(sqlx::FromRow)]
struct CartItemProductRow {
    quantity: i32,
    id: i32,
    name: String,
    price: rust_decimal::Decimal,
    description: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CartItemProductRow {
    fn into_detail(self) -> Result<CartItemDetail, RepositoryError> {
        let quantity = Quantity::new(self.quantity).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid quantity in database: {e}"))
        })?;
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(CartItemDetail {
            product: Product {
                id: ProductId::new(self.id),
                name: self.name,
                price,
                description: self.description,
                image: self.image,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            quantity,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find the cart for an owner scope, with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, owner: Option<AccountId>) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, account_id
            FROM shop.cart
            WHERE account_id IS NOT DISTINCT FROM $1
            ",
        )
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let cart_id = CartId::new(row.id);
        let items = self.items(cart_id).await?;

        Ok(Some(Cart {
            id: cart_id,
            account_id: row.account_id.map(AccountId::new),
            items,
        }))
    }

    /// Find the cart for an owner scope, creating an empty one if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_or_create(&self, owner: Option<AccountId>) -> Result<Cart, RepositoryError> {
        if let Some(cart) = self.find(owner).await? {
            return Ok(cart);
        }

        let created = sqlx::query_as::<_, CartRow>(
            r"
            INSERT INTO shop.cart (account_id)
            VALUES ($1)
            RETURNING id, account_id
            ",
        )
        .bind(owner)
        .fetch_one(self.pool)
        .await;

        match created {
            Ok(row) => Ok(Cart {
                id: CartId::new(row.id),
                account_id: row.account_id.map(AccountId::new),
                items: Vec::new(),
            }),
            Err(e) => {
                // A concurrent request created the cart first; use theirs.
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return self.find(owner).await?.ok_or(RepositoryError::NotFound);
                }
                Err(RepositoryError::Database(e))
            }
        }
    }

    /// Add units of a product to a cart.
    ///
    /// One atomic statement: inserts the line, or increments the existing
    /// line's quantity when the product is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn upsert_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.cart_item (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = shop.cart_item.quantity + EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity.as_i32())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict(format!("no product with id {product_id}"));
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Overwrite the quantity of a cart line.
    ///
    /// # Returns
    ///
    /// Returns `true` if the line existed, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_item_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.cart_item
            SET quantity = $3
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a product's line from a cart.
    ///
    /// # Returns
    ///
    /// Returns `true` if the line existed, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_item
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a cart's lines in product-id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT product_id, quantity
            FROM shop.cart_item
            WHERE cart_id = $1
            ORDER BY product_id ASC
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartItemRow::into_item).collect()
    }

    /// Get a cart's lines with each product reference expanded.
    ///
    /// The SQL form of populate. Product deletion cascades into cart lines,
    /// so the join never loses a row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_with_products(
        &self,
        cart_id: CartId,
    ) -> Result<Vec<CartItemDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemProductRow>(
            r"
            SELECT i.quantity,
                   p.id, p.name, p.price, p.description, p.image,
                   p.created_at, p.updated_at
            FROM shop.cart_item i
            JOIN shop.product p ON p.id = i.product_id
            WHERE i.cart_id = $1
            ORDER BY i.product_id ASC
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartItemProductRow::into_detail).collect()
    }

    /// Delete a cart. Its lines are removed by cascade.
    ///
    /// # Returns
    ///
    /// Returns `true` if the cart existed, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, cart_id: CartId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart
            WHERE id = $1
            ",
        )
        .bind(cart_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every cart, shared and owner-scoped alike.
    ///
    /// # Returns
    ///
    /// Returns the number of carts deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.cart")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
