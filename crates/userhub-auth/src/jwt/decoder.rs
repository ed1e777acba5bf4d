//! Token signature and structure validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use userhub_core::error::AppError;

use super::claims::Claims;

/// Verifies token signatures and decodes their claims.
///
/// Expiry is not checked here: the decoder has no notion of "now". Callers
/// go through [`TokenCodec`](super::TokenCodec), which compares `exp` against
/// its clock.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder for the given shared secret. Only HS256 is accepted.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies the signature and algorithm, then decodes the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => {
                    AppError::invalid_signature("Invalid token signature")
                }
                JwtErrorKind::InvalidAlgorithm => {
                    AppError::invalid_signature("Unexpected signing method")
                }
                _ => AppError::malformed_token(format!("Malformed token: {e}")),
            })?;

        if claims.checked_expires_at().is_none() {
            return Err(AppError::malformed_token("Token expiry is out of range"));
        }
        Ok(claims)
    }
}
