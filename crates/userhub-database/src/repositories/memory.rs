//! In-process [`UserStore`] used by tests and local runs without PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_entity::user::{CreateUser, User};

use super::user::UserStore;

/// [`UserStore`] backed by a `HashMap` behind an async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == data.email) {
            return Err(AppError::duplicate_email("Email already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AppError::duplicate_email("Email already exists"));
        }

        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.password_hash = user.password_hash.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
