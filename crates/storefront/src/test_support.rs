//! In-memory collaborators for router tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tokio::sync::Mutex;

use pantry_core::{
    CurrencyCode, Email, OrderId, OrderStatus, Price, ProductId, UserId, WishlistItemId,
};

use crate::config::{SentryConfig, StorefrontConfig};
use crate::db::RepositoryError;
use crate::models::{Order, OrderItem, Profile, ProfileUpdate, WishlistItem};
use crate::services::UserDataSource;
use crate::state::AppState;

/// [`UserDataSource`] holding everything in memory.
///
/// Setting `fail` makes every call return a database error; `calls` counts
/// delegate invocations.
#[derive(Default)]
pub struct FakeUserData {
    pub profiles: Mutex<HashMap<UserId, Profile>>,
    pub orders: Mutex<Vec<Order>>,
    pub wishlist: Mutex<Vec<WishlistItem>>,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl FakeUserData {
    pub async fn insert_profile(&self, profile: Profile) {
        self.profiles.lock().await.insert(profile.id, profile);
    }

    pub async fn seed_order(&self, user_id: i32, order_id: i32) {
        self.orders.lock().await.push(Order {
            id: OrderId::new(order_id),
            user_id: UserId::new(user_id),
            status: OrderStatus::Paid,
            total: Price::new(Decimal::new(2500, 2), CurrencyCode::USD),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            items: vec![OrderItem {
                product_id: ProductId::parse("p-1").unwrap(),
                product_name: "Dried Pineapple".to_string(),
                quantity: 2,
                unit_price: Decimal::new(1250, 2),
            }],
        });
    }

    pub async fn seed_wishlist_item(&self, user_id: i32, item_id: i32, product_id: &str) {
        self.wishlist.lock().await.push(WishlistItem {
            id: WishlistItemId::new(item_id),
            user_id: UserId::new(user_id),
            product_id: ProductId::parse(product_id).unwrap(),
            product_name: format!("Product {product_id}"),
            product_price: None,
            product_image: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
        });
    }

    fn enter(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDataSource for FakeUserData {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        self.enter()?;
        Ok(self.profiles.lock().await.get(&user_id).cloned())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, RepositoryError> {
        self.enter()?;
        let mut profiles = self.profiles.lock().await;
        let profile = profiles
            .get_mut(&user_id)
            .ok_or(RepositoryError::NotFound)?;
        update.apply_to(profile);
        Ok(profile.clone())
    }

    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        self.enter()?;
        let orders = self.orders.lock().await;
        Ok(orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_wishlist(&self, user_id: UserId) -> Result<Vec<WishlistItem>, RepositoryError> {
        self.enter()?;
        let items = self.wishlist.lock().await;
        Ok(items
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_wishlist_item(&self, id: WishlistItemId) -> Result<(), RepositoryError> {
        self.enter()?;
        let mut items = self.wishlist.lock().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.enter()
    }
}

pub fn sample_profile(id: i32) -> Profile {
    let created = Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap();
    Profile {
        id: UserId::new(id),
        email: Email::parse(&format!("user{id}@example.com")).unwrap(),
        name: None,
        phone: Some("555-0100".to_string()),
        image: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://localhost/pantry_test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        session_days: 7,
        sentry: SentryConfig::default(),
    }
}

pub fn test_state(data: Arc<FakeUserData>) -> AppState {
    AppState::new(test_config(), data)
}
