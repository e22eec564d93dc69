//! Integration tests for Pantry.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate the database and start the storefront
//! cargo run -p pantry-cli -- migrate storefront
//! cargo run -p pantry-storefront
//!
//! # Run integration tests
//! cargo test -p pantry-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Running storefront (default: `http://localhost:3000`)
//! - `STOREFRONT_DATABASE_URL` - Same database the storefront uses (falls back to `DATABASE_URL`)

use pantry_core::{UserId, WishlistItemId};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use uuid::Uuid;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// HTTP client that keeps the session cookie between requests.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn session_client() -> reqwest::Result<Client> {
    Client::builder().cookie_store(true).build()
}

/// Direct database access for seeding fixtures.
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect to the storefront database.
    ///
    /// # Errors
    ///
    /// Returns an error if no database URL is set or the connection fails.
    pub async fn connect() -> Result<Self, sqlx::Error> {
        let url = std::env::var("STOREFRONT_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .map(SecretString::from)
            .map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
        let pool = PgPool::connect(url.expose_secret()).await?;
        Ok(Self { pool })
    }

    /// Insert a user with a unique email and return its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_user(&self, name: &str) -> Result<UserId, sqlx::Error> {
        let email = format!("it-{}@example.com", Uuid::new_v4().simple());
        sqlx::query_scalar(
            r#"INSERT INTO storefront."user" (email, name, phone) VALUES ($1, $2, '555-0100') RETURNING id"#,
        )
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    /// Save a product to a user's account wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_wishlist_item(
        &self,
        user_id: UserId,
        product_id: &str,
    ) -> Result<WishlistItemId, sqlx::Error> {
        sqlx::query_scalar(
            r"
            INSERT INTO storefront.wishlist_item (user_id, product_id, product_name)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(format!("Product {product_id}"))
        .fetch_one(&self.pool)
        .await
    }

    /// Remove a user and everything that cascades from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_user(&self, user_id: UserId) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM storefront."user" WHERE id = $1"#)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
