//! Pantry Core - Shared types library.
//!
//! This crate provides the types shared by the Pantry components:
//! - `storefront` - Public-facing storefront server and user data API
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure state - no I/O, no database
//! access, no HTTP. Database encoding for the ID newtypes is available behind
//! the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`wishlist`] - The session wishlist container with toggle semantics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod wishlist;

pub use types::*;
pub use wishlist::{Wishlist, WishlistProduct, WishlistToggle};
