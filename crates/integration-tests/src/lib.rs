//! Integration tests for Kumquat.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations, then the server
//! cargo run -p kumquat-server
//!
//! # Run integration tests against it
//! cargo test -p kumquat-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP (`SHOP_BASE_URL`, default
//! `http://localhost:5000`) and are `#[ignore]`-gated so a plain
//! `cargo test` stays self-contained.
//!
//! # Test Categories
//!
//! - `products` - Catalog CRUD round trips
//! - `account` - Register / login / change-password flows
//! - `cart` - Cart accumulation, removal, totals, and checkout

#![cfg_attr(not(test), forbid(unsafe_code))]
