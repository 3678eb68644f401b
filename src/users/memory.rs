use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::AppError;
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User};
use crate::users::services::{email_taken, user_not_found, username_taken};
use crate::users::validation::eq_ignore_case;

/// In-process [`UserStore`] used by tests and [`crate::state::AppState::fake`].
/// Enforces the same case-insensitive uniqueness the database indexes do.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, AppError> {
        self.users
            .lock()
            .map_err(|e| AppError::internal(e.to_string()))
    }
}

fn conflict(users: &[User], id: Option<Uuid>, username: &str, email: &str) -> Option<AppError> {
    let others = || users.iter().filter(move |u| Some(u.id) != id);
    if others().any(|u| eq_ignore_case(&u.username, username)) {
        return Some(username_taken());
    }
    if others().any(|u| eq_ignore_case(&u.email, email)) {
        return Some(email_taken());
    }
    None
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| eq_ignore_case(&u.username, username)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| eq_ignore_case(&u.email, email)).cloned())
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, AppError> {
        let mut users = self.lock()?;
        if let Some(err) = conflict(&users, None, &new_user.username, &new_user.email) {
            return Err(err);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.lock()?;
        let idx = users
            .iter()
            .position(|u| u.id == user.id)
            .ok_or_else(user_not_found)?;
        if let Some(err) = conflict(&users, Some(user.id), &user.username, &user.email) {
            return Err(err);
        }
        let stored = &mut users[idx];
        stored.username = user.username.clone();
        stored.email = user.email.clone();
        stored.password_hash = user.password_hash.clone();
        stored.updated_at = OffsetDateTime::now_utc().max(stored.created_at);
        Ok(stored.clone())
    }
}
