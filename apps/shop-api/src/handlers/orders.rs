//! `/api/orders` handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use shop_core::{Order, OrderStatistics, OrderStatus};

use crate::auth::AdminAuth;
use crate::extract::{ApiJson, ApiQuery};
use crate::error::ApiResult;
use crate::services::{CreateOrderRequest, PaymentReceipt};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductSearch {
    pub product: String,
}

/// Card details travel in the body, never in the URL.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub card_number: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order(&id).await?))
}

pub async fn orders_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.orders_for_user(&user_id).await?))
}

pub async fn search_orders(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProductSearch>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.search_orders(&params.product).await?))
}

pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.cancel_order(&id).await?))
}

pub async fn process_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payment): ApiJson<PaymentRequest>,
) -> ApiResult<Json<PaymentReceipt>> {
    Ok(Json(
        state
            .orders
            .process_payment(&id, &payment.card_number)
            .await?,
    ))
}

/// Admin: hand a processing order to the carrier.
pub async fn ship_order(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.ship_order(&id).await?))
}

/// Admin: any allowed lifecycle move, e.g. `shipped → delivered`.
pub async fn update_status(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.update_status(&id, update.status).await?))
}

pub async fn statistics(State(state): State<AppState>) -> ApiResult<Json<OrderStatistics>> {
    Ok(Json(state.orders.statistics().await?))
}
