//! Order history repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use pantry_core::{CurrencyCode, OrderId, OrderStatus, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    status: String,
    total: Decimal,
    currency: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: i32,
    product_id: String,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let product_id = ProductId::parse(&row.product_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product id on order line: {e}"))
        })?;

        Ok(Self {
            product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
        })
    }
}

/// Build an [`Order`] from its row and already-converted lines.
fn order_from_row(row: OrderRow, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
    let status = row
        .status
        .parse::<OrderStatus>()
        .map_err(RepositoryError::DataCorruption)?;
    let currency = row
        .currency
        .parse::<CurrencyCode>()
        .map_err(RepositoryError::DataCorruption)?;

    Ok(Order {
        id: row.id,
        user_id: row.user_id,
        status,
        total: Price::new(row.total, currency),
        created_at: row.created_at,
        items,
    })
}

/// Repository for order history.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first, each with its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status, currency
    /// or product id is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, user_id, status, total, currency, created_at
            FROM storefront.orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id.as_i32()).collect();
        let item_rows: Vec<OrderItemRow> = sqlx::query_as(
            r"
            SELECT order_id, product_id, product_name, quantity, unit_price
            FROM storefront.order_item
            WHERE order_id = ANY($1)
            ORDER BY order_id, id
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            let order_id = row.order_id;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(OrderItem::try_from(row)?);
        }

        orders
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id.as_i32()).unwrap_or_default();
                order_from_row(row, items)
            })
            .collect()
    }
}
