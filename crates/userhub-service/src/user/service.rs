//! Account CRUD: create, list, fetch, update, delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use userhub_auth::jwt::IssuedToken;
use userhub_auth::password::PasswordHasher;
use userhub_auth::session::SessionManager;
use userhub_core::error::AppError;
use userhub_database::repositories::UserStore;
use userhub_entity::user::{CreateUser, UpdateUser, User};

/// Handles user account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    sessions: Arc<SessionManager>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    /// Registers a new account. Nothing is persisted if any field is empty or
    /// the email is taken.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "name, email and password are required",
            ));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::duplicate_email("Email already exists"));
        }

        let user = self
            .users
            .create(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: self.hasher.hash_password(password)?,
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Lists every account.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.find_all().await
    }

    /// Fetches one account.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates name and/or email, returning the account and a token issued
    /// for its (possibly new) email.
    pub async fn update_user(
        &self,
        id: Uuid,
        update: UpdateUser,
    ) -> Result<(User, IssuedToken), AppError> {
        let update = UpdateUser {
            name: update.name.map(|n| n.trim().to_string()),
            email: update.email.map(|e| e.trim().to_string()),
        };

        let mut user = self.get_user(id).await?;

        if let Some(email) = update.email.as_deref().filter(|e| !e.is_empty()) {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::duplicate_email("Email already exists"));
                }
            }
        }

        user.apply(&update);
        let user = self.users.save(&user).await?;
        let token = self.sessions.issue_for(&user.email)?;

        info!(user_id = %user.id, "User updated");
        Ok((user, token))
    }

    /// Deletes an account.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use argon2::Params;
    use userhub_auth::jwt::TokenCodec;
    use userhub_auth::revocation::CacheRevocationStore;
    use userhub_cache::memory::MemoryCacheProvider;
    use userhub_cache::provider::CacheManager;
    use userhub_core::clock::SystemClock;
    use userhub_core::config::cache::MemoryCacheConfig;
    use userhub_core::error::ErrorKind;
    use userhub_database::repositories::MemoryUserRepository;

    use super::*;

    fn service() -> (UserService, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::with_ttl(
            "service-test-secret",
            chrono::Duration::hours(24),
            Arc::new(SystemClock),
        ));
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 }, 60);
        let cache = CacheManager::from_provider(Arc::new(provider), Duration::from_secs(1));
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserRepository::new());
        let hasher = Arc::new(PasswordHasher::with_params(
            Params::new(1024, 1, 1, None).unwrap(),
        ));
        let sessions = Arc::new(SessionManager::new(
            codec.clone(),
            Arc::new(CacheRevocationStore::new(Arc::new(cache))),
            users.clone(),
            hasher.clone(),
        ));
        (UserService::new(users, hasher, sessions), codec)
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let (service, _) = service();
        let user = service
            .create_user(" Ada ", "ada@example.com", "hunter2")
            .await
            .unwrap();

        assert_eq!(user.name, "Ada");
        assert_ne!(user.password_hash, "hunter2");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_fields() {
        let (service, _) = service();
        for (name, email, password) in [
            ("", "ada@example.com", "pw"),
            ("Ada", "  ", "pw"),
            ("Ada", "ada@example.com", ""),
        ] {
            let err = service
                .create_user(name, email, password)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let (service, _) = service();
        service
            .create_user("Ada", "ada@example.com", "pw")
            .await
            .unwrap();

        let err = service
            .create_user("Other", "ada@example.com", "pw2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateEmail);
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_user() {
        let (service, _) = service();
        let id = Uuid::new_v4();
        assert_eq!(
            service.get_user(id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete_user(id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_update_reissues_token_for_new_email() {
        let (service, codec) = service();
        let user = service
            .create_user("Ada", "ada@example.com", "pw")
            .await
            .unwrap();

        let (updated, token) = service
            .update_user(
                user.id,
                UpdateUser {
                    name: None,
                    email: Some("lovelace@example.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.email, "lovelace@example.com");
        let claims = codec.verify(&token.token).unwrap();
        assert_eq!(claims.subject(), "lovelace@example.com");
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_other_account() {
        let (service, _) = service();
        service
            .create_user("Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        let grace = service
            .create_user("Grace", "grace@example.com", "pw")
            .await
            .unwrap();

        let err = service
            .update_user(
                grace.id,
                UpdateUser {
                    name: None,
                    email: Some("ada@example.com".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateEmail);
    }
}
