//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_entity::user::{CreateUser, User};

/// Persistent storage for user records, keyed by id and by unique email.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List all users, oldest first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Insert a new user. Fails with `DuplicateEmail` if the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Persist every mutable column of `user` and bump `updated_at`.
    async fn save(&self, user: &User) -> AppResult<User>;

    /// Delete a user. Returns `false` if no row existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check backend connectivity.
    async fn health_check(&self) -> AppResult<bool>;
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps an insert/update failure, translating the email unique constraint.
fn write_error(e: sqlx::Error, context: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::duplicate_email("Email already exists");
        }
    }
    AppError::with_source(ErrorKind::Database, context, e)
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, name, email, password_hash)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create user"))
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET name = $2, email = $3, password_hash = $4, updated_at = $5
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
