//! # User Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - Registration insert with duplicate-email detection
//! - Lookup by id / email, email search
//! - Premium flag management
//! - Order history aggregation feeding the tiering rules

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use super::escape_like;
use crate::error::{DbError, DbResult};
use shop_core::{OrderHistory, User, UserStatistics};

/// Columns selected for every `User` row.
const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, is_premium, created_at, updated_at";

/// Fields needed to create a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_premium: bool,
}

/// Repository for user database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = UserRepository::new(pool);
///
/// let user = repo.get_by_id("uuid-here").await?;
/// let history = repo.order_stats(&user.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user and returns the stored row.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the email is already registered
    pub async fn insert(&self, new_user: &NewUser) -> DbResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            is_premium: new_user.is_premium,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name,
                is_premium, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_premium)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &user.email),
            other => other,
        })?;

        info!(user_id = %user.id, is_premium = user.is_premium, "User created");
        Ok(user)
    }

    /// Gets a user by ID.
    ///
    /// ## Returns
    /// * `Ok(User)` - User found
    /// * `Err(DbError::NotFound)` - No user with this id
    pub async fn get_by_id(&self, id: &str) -> DbResult<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Gets a user by email, matched case-insensitively.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Lists all users, oldest first.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, email");

        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Finds users whose email contains `term`.
    ///
    /// `%` and `_` in the term match literally.
    pub async fn search_by_email(&self, term: &str, limit: u32) -> DbResult<Vec<User>> {
        let term = term.trim();
        debug!(limit = limit, "Searching users by email");

        let pattern = format!("%{}%", escape_like(term));
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE email LIKE ? ESCAPE '\\' \
             ORDER BY email LIMIT ?"
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Lists users by premium membership.
    pub async fn list_by_premium(&self, is_premium: bool) -> DbResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_premium = ? ORDER BY created_at, email"
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(is_premium)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Counts all users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Counts premium members.
    pub async fn count_premium(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_premium = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Sets or clears premium membership and returns the updated user.
    pub async fn set_premium(&self, id: &str, is_premium: bool) -> DbResult<User> {
        let result = sqlx::query("UPDATE users SET is_premium = ?, updated_at = ? WHERE id = ?")
            .bind(is_premium)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        info!(user_id = %id, is_premium = is_premium, "Premium membership updated");
        self.get_by_id(id).await
    }

    /// Aggregates a user's non-cancelled orders into an [`OrderHistory`].
    ///
    /// A user with no orders gets an empty history, not an error.
    pub async fn order_stats(&self, user_id: &str) -> DbResult<OrderHistory> {
        let (count, spend): (i64, f64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_amount), 0.0)
            FROM orders
            WHERE user_id = ? AND status != 'cancelled'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderHistory {
            completed_orders: u32::try_from(count).unwrap_or(u32::MAX),
            cumulative_spend: spend,
        })
    }

    /// Average number of orders per user, cancelled ones included.
    ///
    /// 0.0 when there are no users.
    pub async fn average_order_count(&self) -> DbResult<f64> {
        let (users, orders): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM users), (SELECT COUNT(*) FROM orders)",
        )
        .fetch_one(&self.pool)
        .await?;

        if users == 0 {
            return Ok(0.0);
        }
        Ok(orders as f64 / users as f64)
    }

    /// Store-wide user figures.
    pub async fn statistics(&self) -> DbResult<UserStatistics> {
        Ok(UserStatistics {
            total_users: self.count().await?,
            premium_users: self.count_premium().await?,
            average_order_count: self.average_order_count().await?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::order::NewOrder;
    use shop_core::OrderStatus;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_user(email: &str, is_premium: bool) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Wonder".to_string(),
            is_premium,
        }
    }

    fn new_order(user_id: &str, total_amount: f64) -> NewOrder {
        NewOrder {
            user_id: user_id.to_string(),
            product_name: "Desk Lamp".to_string(),
            quantity: 1,
            unit_price: total_amount,
            discount_rate: 0.0,
            total_amount,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.users();

        let created = repo.insert(&new_user("alice@example.com", true)).await.unwrap();
        let fetched = repo.get_by_id(&created.id).await.unwrap();

        assert_eq!(fetched.email, "alice@example.com");
        assert!(fetched.is_premium);
        assert_eq!(fetched.full_name(), "Alice Wonder");
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let db = test_db().await;

        let err = db.users().get_by_id("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert(&new_user("bob@example.com", false)).await.unwrap();
        let err = repo
            .insert(&new_user("BOB@example.com", false))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "BOB@example.com");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_by_email_ignores_case() {
        let db = test_db().await;
        let repo = db.users();
        repo.insert(&new_user("carol@example.com", false)).await.unwrap();

        assert!(repo.get_by_email("Carol@Example.com").await.unwrap().is_some());
        assert!(repo.get_by_email("dave@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = test_db().await;
        let repo = db.users();
        repo.insert(&new_user("a_b@example.com", false)).await.unwrap();
        repo.insert(&new_user("axb@example.com", false)).await.unwrap();

        let hits = repo.search_by_email("a_b", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].email, "a_b@example.com");

        let hits = repo.search_by_email("example", 10).await.unwrap();
        assert_eq!(hits.len(), 2);

        let hits = repo.search_by_email("example", 1).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_premium_listing_and_update() {
        let db = test_db().await;
        let repo = db.users();
        let eve = repo.insert(&new_user("eve@example.com", false)).await.unwrap();
        repo.insert(&new_user("fay@example.com", true)).await.unwrap();

        assert_eq!(repo.list_by_premium(true).await.unwrap().len(), 1);

        let updated = repo.set_premium(&eve.id, true).await.unwrap();
        assert!(updated.is_premium);
        assert_eq!(repo.list_by_premium(true).await.unwrap().len(), 2);
        assert_eq!(repo.count_premium().await.unwrap(), 2);

        let err = repo.set_premium("missing", true).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_order_stats_excludes_cancelled() {
        let db = test_db().await;
        let user = db.users().insert(&new_user("gus@example.com", false)).await.unwrap();

        let empty = db.users().order_stats(&user.id).await.unwrap();
        assert_eq!(empty, OrderHistory::default());

        db.orders().insert(&new_order(&user.id, 400.0)).await.unwrap();
        db.orders().insert(&new_order(&user.id, 250.5)).await.unwrap();
        let cancelled = db.orders().insert(&new_order(&user.id, 999.0)).await.unwrap();
        db.orders()
            .update_status(&cancelled.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await
            .unwrap();

        let history = db.users().order_stats(&user.id).await.unwrap();
        assert_eq!(history.completed_orders, 2);
        assert!((history.cumulative_spend - 650.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_statistics() {
        let db = test_db().await;
        let stats = db.users().statistics().await.unwrap();
        assert_eq!(stats, UserStatistics::default());

        let a = db.users().insert(&new_user("h1@example.com", true)).await.unwrap();
        db.users().insert(&new_user("h2@example.com", false)).await.unwrap();
        for _ in 0..3 {
            db.orders().insert(&new_order(&a.id, 10.0)).await.unwrap();
        }

        let stats = db.users().statistics().await.unwrap();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.premium_users, 1);
        assert!((stats.average_order_count - 1.5).abs() < 1e-9);
    }
}
