//! Token creation with HMAC-SHA256 signing.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use userhub_core::error::AppError;

use super::claims::Claims;

/// Signs claims into compact JWS strings.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    header: Header,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("alg", &self.header.alg)
            .finish_non_exhaustive()
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The serialized token.
    pub token: String,
    /// When the token stops verifying.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates an encoder for the given shared secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
        }
    }

    /// Signs `claims`.
    pub fn encode(&self, claims: &Claims) -> Result<IssuedToken, AppError> {
        let token = encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }
}
