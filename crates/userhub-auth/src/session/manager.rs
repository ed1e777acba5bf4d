//! Session lifecycle manager: login, authenticate, logout, password change,
//! and refresh flows.
//!
//! Sessions are not stored. Every call recomputes its state from the
//! presented token, the revocation store, and the user store.

use std::sync::Arc;

use tracing::{error, info, warn};

use userhub_core::error::AppError;
use userhub_core::traits::revocation::RevocationStore;
use userhub_database::repositories::UserStore;

use crate::jwt::{Claims, IssuedToken, TokenCodec};
use crate::password::PasswordHasher;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// What happened when a presented token was revoked.
#[derive(Debug)]
enum RevokeOutcome {
    /// The token was already on the blacklist.
    AlreadyRevoked,
    /// The token was added to the blacklist.
    Revoked(Claims),
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    codec: Arc<TokenCodec>,
    revocations: Arc<dyn RevocationStore>,
    users: Arc<dyn UserStore>,
    password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("codec", &self.codec)
            .field("revocations", &self.revocations)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        codec: Arc<TokenCodec>,
        revocations: Arc<dyn RevocationStore>,
        users: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            codec,
            revocations,
            users,
            password_hasher,
        }
    }

    /// Verifies credentials and issues a token whose subject is `email`.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login failed: unknown email");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let issued = self.codec.issue(&user.email)?;
        info!(user_id = %user.id, "Login successful");
        Ok(issued)
    }

    /// Resolves a bearer token to its claims.
    ///
    /// The blacklist is consulted before the signature so a revoked token is
    /// rejected as `TokenRevoked` regardless of its other properties. A store
    /// failure denies access.
    pub async fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        if self.revocations.is_revoked(token).await? {
            return Err(AppError::token_revoked("Token has been revoked"));
        }
        self.codec.verify(token)
    }

    /// Revokes `token` for the rest of its lifetime.
    ///
    /// Logging out an already-revoked token succeeds without writing again.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        match self.revoke_presented(token).await? {
            RevokeOutcome::AlreadyRevoked => {
                info!("Logout of already revoked token");
            }
            RevokeOutcome::Revoked(claims) => {
                info!(subject = %claims.sub, "Logout successful");
            }
        }
        Ok(())
    }

    /// Replaces the password of the token's subject.
    ///
    /// The presented token is revoked first and cannot be reused, even if a
    /// later step fails.
    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if new_password.is_empty() {
            return Err(AppError::validation("New password must not be empty"));
        }

        if let RevokeOutcome::AlreadyRevoked = self.revoke_presented(token).await? {
            return Err(AppError::token_revoked("Token has been revoked"));
        }

        let subject = self.codec.verify(token)?.sub;

        let Some(mut user) = self.users.find_by_email(&subject).await? else {
            warn!("Password change for a subject with no account");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self
            .password_hasher
            .verify_password(old_password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Password change rejected: wrong old password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        user.password_hash = self.password_hasher.hash_password(new_password)?;
        if let Err(e) = self.users.save(&user).await {
            error!(
                user_id = %user.id,
                error = %e,
                "Token revoked but new password was not saved"
            );
            return Err(e);
        }

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    /// Revokes `token` and issues its successor for the same subject.
    pub async fn refresh(&self, token: &str) -> Result<IssuedToken, AppError> {
        if let RevokeOutcome::AlreadyRevoked = self.revoke_presented(token).await? {
            return Err(AppError::token_revoked("Token has been revoked"));
        }

        let issued = self.codec.refresh(token)?;
        info!("Token refreshed");
        Ok(issued)
    }

    /// Issues a fresh token for `subject` without any credential check.
    pub fn issue_for(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.codec.issue(subject)
    }

    /// Blacklists a presented token until its claimed expiry.
    ///
    /// The blacklist is checked before decoding, and only tokens with a valid
    /// signature are written, since the entry's TTL comes from the claimed
    /// expiry.
    async fn revoke_presented(&self, token: &str) -> Result<RevokeOutcome, AppError> {
        if self.revocations.is_revoked(token).await? {
            return Ok(RevokeOutcome::AlreadyRevoked);
        }

        let claims = self.codec.decode_signed(token)?;
        let ttl = self.codec.remaining_ttl(&claims);
        self.revocations.revoke(token, ttl).await?;
        Ok(RevokeOutcome::Revoked(claims))
    }
}
