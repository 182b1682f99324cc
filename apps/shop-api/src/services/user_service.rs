//! SQLite-backed [`UserService`].
//!
//! Emails and passwords are never logged; log lines carry user ids only.

use async_trait::async_trait;
use tracing::{info, instrument};

use shop_core::pricing::premium_member_price;
use shop_core::validation::{
    validate_email, validate_name, validate_password, validate_search_query,
};
use shop_core::{CustomerStanding, Money, User, UserStatistics, ValidationError};
use shop_db::credentials::hash_password;
use shop_db::{Database, NewUser};

use super::{CreateUserRequest, DiscountQuote, UserService, UserSummary, SEARCH_LIMIT};
use crate::error::{ApiError, ApiResult};

/// User service over the shop database.
#[derive(Debug, Clone)]
pub struct SqliteUserService {
    db: Database,
}

impl SqliteUserService {
    pub fn new(db: Database) -> Self {
        SqliteUserService { db }
    }

    /// Hashes off the async runtime, then inserts.
    async fn insert_user(&self, request: CreateUserRequest) -> ApiResult<User> {
        let email = request.email.trim().to_string();

        if self.db.users().get_by_email(&email).await?.is_some() {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email,
            }
            .into());
        }

        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user = self
            .db
            .users()
            .insert(&NewUser {
                email,
                password_hash,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                is_premium: false,
            })
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserService for SqliteUserService {
    async fn list_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.db.users().list().await?)
    }

    async fn get_user(&self, id: &str) -> ApiResult<User> {
        Ok(self.db.users().get_by_id(id).await?)
    }

    async fn search_users(&self, email: &str) -> ApiResult<Vec<User>> {
        let term = validate_search_query(email)?;
        Ok(self.db.users().search_by_email(&term, SEARCH_LIMIT).await?)
    }

    #[instrument(skip_all)]
    async fn create_user(&self, request: CreateUserRequest) -> ApiResult<User> {
        validate_email(&request.email)?;
        if request.password.is_empty() {
            return Err(ValidationError::Required {
                field: "password".to_string(),
            }
            .into());
        }
        for (field, value) in [
            ("first_name", &request.first_name),
            ("last_name", &request.last_name),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                }
                .into());
            }
        }

        let user = self.insert_user(request).await?;
        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip_all)]
    async fn register_user(&self, request: CreateUserRequest) -> ApiResult<User> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;
        validate_name("first_name", &request.first_name)?;
        validate_name("last_name", &request.last_name)?;

        let user = self.insert_user(request).await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn discount_quote(&self, id: &str, amount: f64) -> ApiResult<DiscountQuote> {
        let user = self.db.users().get_by_id(id).await?;
        let final_amount = premium_member_price(amount, user.is_premium)?;
        let discount = amount - final_amount;

        let summary = format!(
            "Amount: {}, Discount: {}, Final: {}",
            Money::from_amount(amount),
            Money::from_amount(discount),
            Money::from_amount(final_amount)
        );

        Ok(DiscountQuote {
            user_id: user.id,
            amount,
            discount,
            final_amount,
            summary,
        })
    }

    async fn summary(&self, id: &str) -> ApiResult<UserSummary> {
        let user = self.db.users().get_by_id(id).await?;
        let standing = self.db.users().order_stats(&user.id).await?.standing()?;

        Ok(UserSummary {
            full_name: user.full_name(),
            id: user.id,
            email: user.email,
            is_premium: user.is_premium,
            order_count: standing.completed_orders,
            tier: standing.tier,
            eligible_for_premium: standing.eligible_for_premium,
        })
    }

    async fn standing(&self, id: &str) -> ApiResult<CustomerStanding> {
        let user = self.db.users().get_by_id(id).await?;
        let history = self.db.users().order_stats(&user.id).await?;
        Ok(history.standing()?)
    }

    async fn set_premium(&self, id: &str, is_premium: bool) -> ApiResult<User> {
        Ok(self.db.users().set_premium(id, is_premium).await?)
    }

    async fn statistics(&self) -> ApiResult<UserStatistics> {
        Ok(self.db.users().statistics().await?)
    }
}
