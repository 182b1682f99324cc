//! # Order Repository
//!
//! Database operations for orders.
//!
//! Amounts are stored exactly as the pricing rules produced them. Status
//! transitions are checked by the caller through
//! [`Order::ensure_transition`](shop_core::Order::ensure_transition); this
//! repository persists them with a compare-and-set on the old status.
//!
//! ## Statistics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders                                                                 │
//! │  ┌──────────┬────────────┬─────────────┐                               │
//! │  │ o-1      │ 400.00     │ delivered   │ ──► revenue                   │
//! │  │ o-2      │ 250.50     │ pending     │ ──► revenue                   │
//! │  │ o-3      │ 999.00     │ cancelled   │ ──► counted, no revenue       │
//! │  └──────────┴────────────┴─────────────┘                               │
//! │                                                                         │
//! │  total_orders = 3, cancelled = 1, revenue = 650.50, average = 325.25   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use super::escape_like;
use crate::error::{DbError, DbResult};
use shop_core::{Order, OrderStatistics, OrderStatus};

const ORDER_COLUMNS: &str = "id, user_id, product_name, quantity, unit_price, discount_rate, \
                             total_amount, status, created_at, updated_at";

/// A priced order ready to be stored. New orders always start `Pending`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount_rate: f64,
    pub total_amount: f64,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new pending order.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - `user_id` does not exist
    pub async fn insert(&self, new_order: &NewOrder) -> DbResult<Order> {
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: new_order.user_id.clone(),
            product_name: new_order.product_name.clone(),
            quantity: new_order.quantity,
            unit_price: new_order.unit_price,
            discount_rate: new_order.discount_rate,
            total_amount: new_order.total_amount,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, product_name, quantity, unit_price,
                discount_rate, total_amount, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(&order.product_name)
        .bind(order.quantity)
        .bind(order.unit_price)
        .bind(order.discount_rate)
        .bind(order.total_amount)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            quantity = order.quantity,
            discount_rate = order.discount_rate,
            "Order created"
        );
        Ok(order)
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Order> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");

        sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Lists all orders, newest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id");

        let orders = sqlx::query_as::<_, Order>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Lists one user's orders, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ? ORDER BY created_at DESC, id"
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Finds orders whose product name contains `term`, case-insensitively.
    pub async fn search_by_product(&self, term: &str, limit: u32) -> DbResult<Vec<Order>> {
        let term = term.trim();
        debug!(term = %term, limit = limit, "Searching orders by product");

        let pattern = format!("%{}%", escape_like(term));
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE product_name LIKE ? ESCAPE '\\' \
             ORDER BY created_at DESC, id LIMIT ?"
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Moves an order from `from` to `to` and returns the updated row.
    ///
    /// The write only lands if the row still holds `from`, so two requests
    /// that both validated against the same status cannot both succeed.
    /// `Ok(None)` means the order changed underneath the caller (or is
    /// gone); re-read it to find out which.
    pub async fn update_status(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> DbResult<Option<Order>> {
        let result = sqlx::query(
            "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(to)
        .bind(Utc::now())
        .bind(id)
        .bind(from)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(order_id = %id, expected = %from, "Status write skipped");
            return Ok(None);
        }

        info!(order_id = %id, from = %from, to = %to, "Order status updated");
        self.get_by_id(id).await.map(Some)
    }

    /// Store-wide order figures; cancelled orders earn no revenue.
    pub async fn statistics(&self) -> DbResult<OrderStatistics> {
        let (total, cancelled, revenue): (i64, i64, f64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN status = 'cancelled' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status != 'cancelled' THEN total_amount ELSE 0.0 END), 0.0)
            FROM orders
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderStatistics::from_totals(total, cancelled, revenue))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
