//! Issue, verify, and refresh bearer tokens against an injected clock.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use userhub_core::clock::Clock;
use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;

use super::claims::Claims;
use super::decoder::JwtDecoder;
use super::encoder::{IssuedToken, JwtEncoder};

/// Token codec: every token carries a subject and an absolute expiry set to
/// `now + ttl` at issuance.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(
            &config.jwt_secret,
            chrono::Duration::hours(config.token_ttl_hours as i64),
            clock,
        )
    }

    /// Creates a codec with an explicit token lifetime.
    pub fn with_ttl(secret: &str, ttl: chrono::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoder: JwtEncoder::new(secret),
            decoder: JwtDecoder::new(secret),
            ttl,
            clock,
        }
    }

    /// Issues a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, AppError> {
        let now = self.clock.now();
        self.encoder.encode(&Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4(),
        })
    }

    /// Verifies signature, algorithm, and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decoder.decode(token)?;
        if claims.is_expired_at(self.clock.now()) {
            return Err(AppError::token_expired("Token has expired"));
        }
        Ok(claims)
    }

    /// Verifies signature and algorithm but accepts expired tokens.
    ///
    /// Used where only the claimed expiry is needed, such as computing how
    /// long a revocation entry must live.
    pub fn decode_signed(&self, token: &str) -> Result<Claims, AppError> {
        self.decoder.decode(token)
    }

    /// Issues a successor for a still-valid token, carrying the same subject.
    ///
    /// The successor always expires strictly after the original.
    pub fn refresh(&self, token: &str) -> Result<IssuedToken, AppError> {
        let old = self.verify(token)?;
        let now = self.clock.now();
        let exp = (now + self.ttl).timestamp().max(old.exp + 1);
        self.encoder.encode(&Claims {
            sub: old.sub,
            iat: now.timestamp(),
            exp,
            jti: Uuid::new_v4(),
        })
    }

    /// Lifetime left on `claims` according to this codec's clock.
    pub fn remaining_ttl(&self, claims: &Claims) -> Duration {
        claims.remaining_ttl(self.clock.now())
    }
}
