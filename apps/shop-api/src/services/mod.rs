//! # Service Layer
//!
//! Use cases behind the HTTP handlers.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────┐     ┌──────────────┐
//! │   handlers   │────►│ dyn UserService      │────►│   shop-db    │
//! │  (axum)      │     │ dyn OrderService     │     │ repositories │
//! └──────────────┘     └──────────┬───────────┘     └──────────────┘
//!                                 │
//!                                 ▼
//!                        shop-core rules
//!                   (compute_total, classify, ...)
//! ```
//!
//! Handlers depend on the traits only; the SQLite implementations live in
//! [`user_service`] and [`order_service`].

pub mod order_service;
pub mod user_service;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use shop_core::{
    CustomerStanding, Order, OrderStatistics, OrderStatus, TierCategory, User, UserStatistics,
};

use crate::error::ApiResult;

pub use order_service::SqliteOrderService;
pub use user_service::SqliteUserService;

/// Maximum rows returned by the search endpoints.
pub const SEARCH_LIMIT: u32 = 50;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body of `POST /api/users` and `POST /api/users/register`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

// Passwords stay out of Debug output.
impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Premium member price for an amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    pub user_id: String,
    pub amount: f64,
    pub discount: f64,
    pub final_amount: f64,
    /// e.g. `Amount: €100.00, Discount: €10.00, Final: €90.00`
    pub summary: String,
}

/// Account overview for `GET /api/users/{id}/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub is_premium: bool,
    /// Non-cancelled orders.
    pub order_count: u32,
    pub tier: TierCategory,
    pub eligible_for_premium: bool,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Outcome of `POST /api/orders/{id}/payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub order_id: String,
    pub status: OrderStatus,
    pub amount_charged: f64,
    /// Last four digits only.
    pub card: String,
    /// Total above the large-order threshold; held for manual review.
    pub requires_review: bool,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Customer accounts, discounts and loyalty standing.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> ApiResult<Vec<User>>;

    async fn get_user(&self, id: &str) -> ApiResult<User>;

    async fn search_users(&self, email: &str) -> ApiResult<Vec<User>>;

    /// Creates an account with basic checks (email format, required fields).
    async fn create_user(&self, request: CreateUserRequest) -> ApiResult<User>;

    /// Creates an account after full validation: email, password strength, names.
    async fn register_user(&self, request: CreateUserRequest) -> ApiResult<User>;

    async fn discount_quote(&self, id: &str, amount: f64) -> ApiResult<DiscountQuote>;

    async fn summary(&self, id: &str) -> ApiResult<UserSummary>;

    async fn standing(&self, id: &str) -> ApiResult<CustomerStanding>;

    async fn set_premium(&self, id: &str, is_premium: bool) -> ApiResult<User>;

    async fn statistics(&self) -> ApiResult<UserStatistics>;
}

/// Order placement, payment and fulfilment.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn list_orders(&self) -> ApiResult<Vec<Order>>;

    async fn get_order(&self, id: &str) -> ApiResult<Order>;

    async fn orders_for_user(&self, user_id: &str) -> ApiResult<Vec<Order>>;

    async fn search_orders(&self, product: &str) -> ApiResult<Vec<Order>>;

    /// Prices the order for the user's membership and stores it as pending.
    async fn create_order(&self, request: CreateOrderRequest) -> ApiResult<Order>;

    async fn cancel_order(&self, id: &str) -> ApiResult<Order>;

    /// Validates the card and moves a pending order to processing.
    async fn process_payment(&self, id: &str, card_number: &str) -> ApiResult<PaymentReceipt>;

    async fn ship_order(&self, id: &str) -> ApiResult<Order>;

    async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order>;

    async fn statistics(&self) -> ApiResult<OrderStatistics>;
}
