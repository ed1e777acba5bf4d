//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token signing and lifetime configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). Required.
    #[serde(default)]
    pub jwt_secret: String,
    /// Lifetime of an issued token in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

fn default_token_ttl() -> u64 {
    24
}
