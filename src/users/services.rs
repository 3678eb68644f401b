use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::auth::password::Password;
use crate::errors::AppError;
use crate::users::{
    dto::{CreateUser, UpdateUser},
    repo::UserStore,
    repo_types::{NewUser, User},
    validation::{eq_ignore_case, validate_email, validate_password, validate_username},
};

pub(crate) fn username_taken() -> AppError {
    AppError::validation("Username already exists", "Use a different username")
}

pub(crate) fn email_taken() -> AppError {
    AppError::validation("Email already exists", "Use a different email")
}

pub(crate) fn user_not_found() -> AppError {
    AppError::not_found("User not found", "Check the username and try again")
}

fn email_not_found() -> AppError {
    AppError::not_found("User not found", "Check the email and try again")
}

/// User model: uniqueness-checked create/update and lookups on top of a
/// [`UserStore`].
#[derive(Clone)]
pub struct UserModel {
    store: Arc<dyn UserStore>,
    password: Password,
}

impl UserModel {
    pub fn new(store: Arc<dyn UserStore>, password: Password) -> Self {
        Self { store, password }
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create(&self, input: CreateUser) -> Result<User, AppError> {
        validate_username(&input.username)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;

        self.ensure_unique_username(&input.username).await?;
        self.ensure_unique_email(&input.email).await?;
        let password_hash = self.password.hash(&input.password)?;

        let user = self
            .store
            .insert(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Applies the fields present in `patch` to the user named `username`.
    /// Only present fields are validated; a username or email that matches
    /// the current one ignoring case is not re-checked for uniqueness.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, username: &str, patch: UpdateUser) -> Result<User, AppError> {
        let mut user = self.find_one_by_username(username).await?;

        if let Some(new_username) = patch.username {
            validate_username(&new_username)?;
            if !eq_ignore_case(&user.username, &new_username) {
                self.ensure_unique_username(&new_username).await?;
            }
            user.username = new_username;
        }

        if let Some(new_email) = patch.email {
            validate_email(&new_email)?;
            if !eq_ignore_case(&user.email, &new_email) {
                self.ensure_unique_email(&new_email).await?;
            }
            user.email = new_email;
        }

        if let Some(new_password) = patch.password {
            validate_password(&new_password)?;
            user.password_hash = self.password.hash(&new_password)?;
        }

        let updated = self.store.update(&user).await?;
        info!(user_id = %updated.id, "user updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn find_one_by_username(&self, username: &str) -> Result<User, AppError> {
        self.store
            .find_by_username(username)
            .await?
            .ok_or_else(user_not_found)
    }

    #[instrument(skip(self))]
    pub async fn find_one_by_email(&self, email: &str) -> Result<User, AppError> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(email_not_found)
    }

    async fn ensure_unique_username(&self, username: &str) -> Result<(), AppError> {
        if self.store.find_by_username(username).await?.is_some() {
            warn!(%username, "username already taken");
            return Err(username_taken());
        }
        Ok(())
    }

    async fn ensure_unique_email(&self, email: &str) -> Result<(), AppError> {
        if self.store.find_by_email(email).await?.is_some() {
            warn!(%email, "email already taken");
            return Err(email_taken());
        }
        Ok(())
    }
}
