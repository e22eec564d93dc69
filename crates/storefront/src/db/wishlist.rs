//! Account wishlist repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use pantry_core::{ProductId, UserId, WishlistItemId};

use super::RepositoryError;
use crate::models::WishlistItem;

#[derive(sqlx::FromRow)]
struct WishlistItemRow {
    id: WishlistItemId,
    user_id: UserId,
    product_id: String,
    product_name: String,
    product_price: Option<Decimal>,
    product_image: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<WishlistItemRow> for WishlistItem {
    type Error = RepositoryError;

    fn try_from(row: WishlistItemRow) -> Result<Self, Self::Error> {
        let product_id = ProductId::parse(&row.product_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product id in wishlist: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            product_id,
            product_name: row.product_name,
            product_price: row.product_price,
            product_image: row.product_image,
            created_at: row.created_at,
        })
    }
}

/// Repository for account-level wishlist items.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's saved products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WishlistItem>, RepositoryError> {
        let rows: Vec<WishlistItemRow> = sqlx::query_as(
            r"
            SELECT id, user_id, product_id, product_name, product_price,
                   product_image, created_at
            FROM storefront.wishlist_item
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(WishlistItem::try_from).collect()
    }

    /// Delete a wishlist item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: WishlistItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.wishlist_item WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
