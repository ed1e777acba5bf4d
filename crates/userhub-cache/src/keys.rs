//! Cache key builders for every UserHub cache entry.

/// Namespace for revoked bearer tokens.
const REVOKED: &str = "revoked";

/// Cache key for a revoked token, addressed by its SHA-256 digest.
pub fn revoked_token(token_hash: &str) -> String {
    format!("{REVOKED}:{token_hash}")
}
