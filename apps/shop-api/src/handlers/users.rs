//! `/api/users` handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use shop_core::{CustomerStanding, User, UserStatistics};

use crate::auth::AdminAuth;
use crate::extract::{ApiJson, ApiQuery};
use crate::error::{ApiError, ApiResult};
use crate::services::{CreateUserRequest, DiscountQuote, UserSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailSearch {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscountParams {
    pub amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumUpdate {
    pub is_premium: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub user_id: String,
    pub message: String,
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.list_users().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get_user(&id).await?))
}

pub async fn search_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<EmailSearch>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.search_users(&params.email).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.users.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<RegistrationResponse>)> {
    let user = state.users.register_user(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: format!("User registered: {}", user.id),
            user_id: user.id,
        }),
    ))
}

pub async fn discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<DiscountParams>,
) -> ApiResult<Json<DiscountQuote>> {
    let amount = params
        .amount
        .ok_or_else(|| ApiError::BadRequest("amount is required".to_string()))?;

    Ok(Json(state.users.discount_quote(&id, amount).await?))
}

pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserSummary>> {
    Ok(Json(state.users.summary(&id).await?))
}

pub async fn tier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CustomerStanding>> {
    Ok(Json(state.users.standing(&id).await?))
}

/// Admin: grant or revoke premium membership.
pub async fn set_premium(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<PremiumUpdate>,
) -> ApiResult<Json<User>> {
    let user = state.users.set_premium(&id, update.is_premium).await?;
    info!(user_id = %user.id, is_premium = user.is_premium, "Premium membership changed by admin");
    Ok(Json(user))
}

pub async fn statistics(State(state): State<AppState>) -> ApiResult<Json<UserStatistics>> {
    Ok(Json(state.users.statistics().await?))
}
