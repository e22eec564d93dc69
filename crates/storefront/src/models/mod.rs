//! Domain models for the storefront.
//!
//! These are the records the user data API returns. They are validated domain
//! types, separate from the database row types in [`crate::db`].

pub mod order;
pub mod profile;
pub mod session;
pub mod wishlist_item;

pub use order::{Order, OrderItem};
pub use profile::{Profile, ProfileUpdate};
pub use session::keys as session_keys;
pub use wishlist_item::WishlistItem;
