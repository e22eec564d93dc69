//! Business logic services for storefront.
//!
//! # Services
//!
//! - `user_data` - The data-access seam behind the user data API

pub mod user_data;

pub use user_data::{PgUserDataSource, UserDataSource};
