//! SQLite-backed [`OrderService`].
//!
//! ## Status Flow
//! ```text
//!   create ──► Pending ──payment──► Processing ──ship──► Shipped ──► Delivered
//!                 │                     │
//!                 └──────cancel─────────┴──► Cancelled
//! ```
//!
//! Every transition goes through [`Order::ensure_transition`] and is
//! written conditionally on the status it was checked against; a refused
//! move surfaces as 409 Conflict. Card numbers are validated, masked for
//! the receipt and then dropped: never stored, never logged.

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use shop_core::validation::{
    mask_card_number, validate_amount, validate_card_number, validate_product_name,
    validate_quantity, validate_search_query, validate_uuid,
};
use shop_core::{
    compute_total, Order, OrderStatistics, OrderStatus, PAYMENT_LARGE_ORDER_THRESHOLD,
};
use shop_db::{Database, NewOrder};

use super::{CreateOrderRequest, OrderService, PaymentReceipt, SEARCH_LIMIT};
use crate::error::ApiResult;

/// Order service over the shop database.
#[derive(Debug, Clone)]
pub struct SqliteOrderService {
    db: Database,
}

impl SqliteOrderService {
    pub fn new(db: Database) -> Self {
        SqliteOrderService { db }
    }

    /// Checks the move against the current status and writes it only if no
    /// one else changed the order in between. A lost race re-reads the
    /// order, so a concurrent ship and cancel cannot both succeed.
    async fn transition(&self, id: &str, next: OrderStatus) -> ApiResult<Order> {
        loop {
            let order = self.db.orders().get_by_id(id).await?;

            if let Err(err) = order.ensure_transition(next) {
                warn!(order_id = %id, from = %order.status, to = %next, "Refused status change");
                return Err(err.into());
            }

            // Statuses only move forward, so this retries at most a few times.
            if let Some(updated) = self
                .db
                .orders()
                .update_status(id, order.status, next)
                .await?
            {
                return Ok(updated);
            }
        }
    }
}

#[async_trait]
impl OrderService for SqliteOrderService {
    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.db.orders().list().await?)
    }

    async fn get_order(&self, id: &str) -> ApiResult<Order> {
        Ok(self.db.orders().get_by_id(id).await?)
    }

    async fn orders_for_user(&self, user_id: &str) -> ApiResult<Vec<Order>> {
        let user = self.db.users().get_by_id(user_id).await?;
        Ok(self.db.orders().list_by_user(&user.id).await?)
    }

    async fn search_orders(&self, product: &str) -> ApiResult<Vec<Order>> {
        let term = validate_search_query(product)?;
        Ok(self.db.orders().search_by_product(&term, SEARCH_LIMIT).await?)
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    async fn create_order(&self, request: CreateOrderRequest) -> ApiResult<Order> {
        validate_uuid(&request.user_id)?;
        validate_product_name(&request.product_name)?;
        validate_quantity(request.quantity)?;
        validate_amount("unit_price", request.unit_price)?;

        let user = self.db.users().get_by_id(&request.user_id).await?;
        let priced = compute_total(request.unit_price, request.quantity, user.is_premium)?;

        let order = self
            .db
            .orders()
            .insert(&NewOrder {
                user_id: user.id,
                product_name: request.product_name.trim().to_string(),
                quantity: request.quantity,
                unit_price: request.unit_price,
                discount_rate: priced.discount_rate(),
                total_amount: priced.net_amount(),
            })
            .await?;

        Ok(order)
    }

    async fn cancel_order(&self, id: &str) -> ApiResult<Order> {
        let order = self.transition(id, OrderStatus::Cancelled).await?;
        info!(order_id = %id, "Order cancelled");
        Ok(order)
    }

    #[instrument(skip(self, card_number))]
    async fn process_payment(&self, id: &str, card_number: &str) -> ApiResult<PaymentReceipt> {
        validate_card_number(card_number)?;

        let order = self.transition(id, OrderStatus::Processing).await?;
        let requires_review = order.total_amount > PAYMENT_LARGE_ORDER_THRESHOLD;

        info!(
            order_id = %order.id,
            requires_review = requires_review,
            "Payment accepted"
        );

        Ok(PaymentReceipt {
            order_id: order.id,
            status: order.status,
            amount_charged: order.total_amount,
            card: mask_card_number(card_number),
            requires_review,
        })
    }

    async fn ship_order(&self, id: &str) -> ApiResult<Order> {
        let order = self.transition(id, OrderStatus::Shipped).await?;
        info!(order_id = %id, "Order shipped");
        Ok(order)
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
        self.transition(id, status).await
    }

    async fn statistics(&self) -> ApiResult<OrderStatistics> {
        Ok(self.db.orders().statistics().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use shop_db::{DbConfig, NewUser};

    const CARD: &str = "4111 1111 1111 1111";

    async fn setup(is_premium: bool) -> (SqliteOrderService, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = db
            .users()
            .insert(&NewUser {
                email: "buyer@example.com".to_string(),
                password_hash: "hash".to_string(),
                first_name: "Bea".to_string(),
                last_name: "Buyer".to_string(),
                is_premium,
            })
            .await
            .unwrap();
        (SqliteOrderService::new(db), user.id)
    }

    fn order_request(user_id: &str, quantity: i64, unit_price: f64) -> CreateOrderRequest {
        CreateOrderRequest {
            user_id: user_id.to_string(),
            product_name: "MacBook Pro 16".to_string(),
            quantity,
            unit_price,
        }
    }

    #[tokio::test]
    async fn test_create_order_applies_standard_bulk_discount() {
        let (service, user_id) = setup(false).await;

        let order = service
            .create_order(order_request(&user_id, 15, 100.0))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert!((order.discount_rate - 0.05).abs() < 1e-12);
        assert!((order.total_amount - 1425.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_create_order_applies_premium_rate() {
        let (service, user_id) = setup(true).await;

        let order = service
            .create_order(order_request(&user_id, 6, 50.0))
            .await
            .unwrap();

        assert!((order.discount_rate - 0.15).abs() < 1e-12);
        assert!((order.total_amount - 255.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_create_order_rejects_bad_input() {
        let (service, user_id) = setup(false).await;

        let err = service
            .create_order(order_request(&user_id, 0, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = service
            .create_order(order_request(&user_id, 1, -5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let missing = "00000000-0000-4000-8000-000000000000";
        let err = service
            .create_order(order_request(missing, 1, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_payment_moves_to_processing_and_flags_large_orders() {
        let (service, user_id) = setup(false).await;
        let small = service
            .create_order(order_request(&user_id, 1, 20.0))
            .await
            .unwrap();
        let large = service
            .create_order(order_request(&user_id, 1, 2499.0))
            .await
            .unwrap();

        let receipt = service.process_payment(&small.id, CARD).await.unwrap();
        assert_eq!(receipt.status, OrderStatus::Processing);
        assert_eq!(receipt.card, "**** 1111");
        assert!(!receipt.requires_review);

        let receipt = service.process_payment(&large.id, CARD).await.unwrap();
        assert!(receipt.requires_review);

        // Already paid.
        let err = service.process_payment(&small.id, CARD).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_payment_rejects_invalid_card_without_state_change() {
        let (service, user_id) = setup(false).await;
        let order = service
            .create_order(order_request(&user_id, 1, 20.0))
            .await
            .unwrap();

        let err = service
            .process_payment(&order.id, "4111 1111 1111 1112")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(
            service.get_order(&order.id).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_cancel_rules() {
        let (service, user_id) = setup(false).await;
        let order = service
            .create_order(order_request(&user_id, 1, 20.0))
            .await
            .unwrap();

        service.process_payment(&order.id, CARD).await.unwrap();
        service.ship_order(&order.id).await.unwrap();

        let err = service.cancel_order(&order.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let other = service
            .create_order(order_request(&user_id, 1, 20.0))
            .await
            .unwrap();
        let cancelled = service.cancel_order(&other.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let err = service
            .update_status(&other.id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_orders_for_unknown_user() {
        let (service, _) = setup(false).await;
        let err = service.orders_for_user("nobody").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_ship_and_cancel_cannot_both_win() {
        let (service, user_id) = setup(false).await;

        for _ in 0..25 {
            let order = service
                .create_order(order_request(&user_id, 1, 20.0))
                .await
                .unwrap();
            service.process_payment(&order.id, CARD).await.unwrap();

            let (shipped, cancelled) =
                tokio::join!(service.ship_order(&order.id), service.cancel_order(&order.id));
            let final_status = service.get_order(&order.id).await.unwrap().status;

            match (shipped, cancelled) {
                (Ok(_), Err(err)) => {
                    assert!(matches!(err, ApiError::Conflict(_)));
                    assert_eq!(final_status, OrderStatus::Shipped);
                }
                (Err(err), Ok(_)) => {
                    assert!(matches!(err, ApiError::Conflict(_)));
                    assert_eq!(final_status, OrderStatus::Cancelled);
                }
                (shipped, cancelled) => {
                    panic!("expected exactly one winner, got {shipped:?} and {cancelled:?}")
                }
            }
        }
    }

    #[tokio::test]
    async fn test_transition_on_missing_order() {
        let (service, _) = setup(false).await;
        let err = service.ship_order("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
