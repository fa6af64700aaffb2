//! Domain types for the shop.
//!
//! These types represent validated domain objects separate from database
//! row types. All of them serialize directly into API response bodies.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartItemDetail};
pub use product::Product;
pub use user::User;
