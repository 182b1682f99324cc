//! Route definitions

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Create the main router with all routes.
///
/// Admin routes (premium, ship, status) check the bearer key in their
/// `AdminAuth` extractor.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Users
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/api/users/search", get(handlers::users::search_users))
        .route("/api/users/register", post(handlers::users::register))
        .route("/api/users/statistics", get(handlers::users::statistics))
        .route("/api/users/{id}", get(handlers::users::get_user))
        .route("/api/users/{id}/discount", get(handlers::users::discount))
        .route("/api/users/{id}/summary", get(handlers::users::summary))
        .route("/api/users/{id}/tier", get(handlers::users::tier))
        .route("/api/users/{id}/premium", put(handlers::users::set_premium))
        // Orders
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/api/orders/search", get(handlers::orders::search_orders))
        .route("/api/orders/statistics", get(handlers::orders::statistics))
        .route(
            "/api/orders/user/{user_id}",
            get(handlers::orders::orders_for_user),
        )
        .route("/api/orders/{id}", get(handlers::orders::get_order))
        .route("/api/orders/{id}/cancel", put(handlers::orders::cancel_order))
        .route(
            "/api/orders/{id}/payment",
            post(handlers::orders::process_payment),
        )
        .route("/api/orders/{id}/ship", post(handlers::orders::ship_order))
        .route("/api/orders/{id}/status", put(handlers::orders::update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
