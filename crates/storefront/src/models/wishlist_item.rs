//! Persisted wishlist records.
//!
//! These are account-level favorites stored in the database, distinct from the
//! session wishlist in [`pantry_core::Wishlist`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pantry_core::{ProductId, UserId, WishlistItemId};

/// A product saved to a user's account wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Option<Decimal>,
    pub product_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
