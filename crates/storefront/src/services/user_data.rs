//! Data access for the user data API.
//!
//! Handlers in [`crate::routes::api::user`] only talk to [`UserDataSource`].
//! Production wires in [`PgUserDataSource`]; tests substitute an in-memory
//! implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use pantry_core::{UserId, WishlistItemId};

use crate::db::{OrderRepository, ProfileRepository, RepositoryError, WishlistRepository};
use crate::models::{Order, Profile, ProfileUpdate, WishlistItem};

/// Persistence operations needed by the user data API.
#[async_trait]
pub trait UserDataSource: Send + Sync + 'static {
    /// Fetch a profile; `Ok(None)` when the user does not exist.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError>;

    /// Apply a partial update and return the stored profile.
    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, RepositoryError>;

    /// List a user's orders.
    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError>;

    /// List a user's account wishlist.
    async fn list_wishlist(&self, user_id: UserId) -> Result<Vec<WishlistItem>, RepositoryError>;

    /// Delete one account wishlist item.
    async fn delete_wishlist_item(&self, id: WishlistItemId) -> Result<(), RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// [`UserDataSource`] backed by the storefront `PostgreSQL` database.
#[derive(Clone)]
pub struct PgUserDataSource {
    pool: PgPool,
}

impl PgUserDataSource {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDataSource for PgUserDataSource {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        ProfileRepository::new(&self.pool).get_by_id(user_id).await
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, RepositoryError> {
        let profiles = ProfileRepository::new(&self.pool);
        if update.is_empty() {
            // Nothing to write; report the stored profile as-is
            return profiles
                .get_by_id(user_id)
                .await?
                .ok_or(RepositoryError::NotFound);
        }
        profiles.update(user_id, update).await
    }

    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(&self.pool).list_for_user(user_id).await
    }

    async fn list_wishlist(&self, user_id: UserId) -> Result<Vec<WishlistItem>, RepositoryError> {
        WishlistRepository::new(&self.pool)
            .list_for_user(user_id)
            .await
    }

    async fn delete_wishlist_item(&self, id: WishlistItemId) -> Result<(), RepositoryError> {
        WishlistRepository::new(&self.pool).delete(id).await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
