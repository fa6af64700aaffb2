//! Business services.
//!
//! Services wrap repositories and own the operation-level rules; routes
//! stay thin. Each service takes the pool through its constructor.

pub mod account;
pub mod cart;

pub use account::{AccountError, AccountService};
pub use cart::{CartError, CartService};
