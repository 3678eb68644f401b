use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::users::repo_types::{NewUser, User};

/// Storage seam for the user model. Lookups are case-insensitive; stored
/// values keep their original case.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert(&self, new_user: &NewUser) -> Result<User, AppError>;
    /// Writes username, email and hash of `user.id`, bumping `updated_at`.
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE LOWER(username) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(translate_write_error)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2,
                email = $3,
                password_hash = $4,
                updated_at = now()
            WHERE id = $1
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(&self.db)
        .await
        .map_err(translate_write_error)?
        .ok_or_else(super::services::user_not_found)
    }
}

// The unique indexes on LOWER(username)/LOWER(email) catch writes that slip
// between the uniqueness check and the statement.
fn translate_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            match db.constraint() {
                Some("users_username_lower_key") => return super::services::username_taken(),
                Some("users_email_lower_key") => return super::services::email_taken(),
                _ => {}
            }
        }
    }
    AppError::from(e)
}
