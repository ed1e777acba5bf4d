//! Identity claims carried by every bearer token.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID. Keeps two tokens issued in the same second distinct.
    pub jti: Uuid,
}

/// Extra lifetime given to revocation entries. A token still verifies at
/// exactly `exp`, so its blacklist entry must outlive that instant.
const REVOCATION_MARGIN: Duration = Duration::from_millis(1);

impl Claims {
    /// Returns the subject claim.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    ///
    /// An `exp` outside the representable range reads as the earliest
    /// instant, so such claims count as expired. Decoded tokens never carry
    /// one: [`JwtDecoder`](super::JwtDecoder) rejects them as malformed.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.checked_expires_at().unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Returns the expiration, or `None` if `exp` is out of range.
    pub fn checked_expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Returns `true` once `now` is strictly past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() < now
    }

    /// How long a revocation entry written at `now` must live to cover every
    /// instant at which the token still verifies. Zero once expired.
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at() - now)
            .to_std()
            .map(|remaining| remaining + REVOCATION_MARGIN)
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: "ada@example.com".to_string(),
            iat: exp - 100,
            exp,
            jti: Uuid::new_v4(),
        }
    }

    fn at(secs: i64, millis: u32) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, millis * 1_000_000).unwrap()
    }

    #[test]
    fn test_remaining_ttl() {
        let now = at(1_000, 0);
        assert_eq!(
            claims(1_060).remaining_ttl(now),
            Duration::from_secs(60) + REVOCATION_MARGIN
        );
        assert_eq!(claims(1_000).remaining_ttl(now), REVOCATION_MARGIN);
        assert_eq!(claims(900).remaining_ttl(now), Duration::ZERO);
    }

    #[test]
    fn test_remaining_ttl_keeps_sub_second_precision() {
        let now = at(1_000, 400);
        assert_eq!(
            claims(1_001).remaining_ttl(now),
            Duration::from_millis(601)
        );
        assert_eq!(claims(1_000).remaining_ttl(now), Duration::ZERO);
    }

    #[test]
    fn test_expiry_boundary() {
        assert!(!claims(1_000).is_expired_at(at(1_000, 0)));
        assert!(claims(1_000).is_expired_at(at(1_000, 1)));
        assert!(claims(1_000).is_expired_at(at(1_000, 900)));
        assert!(claims(999).is_expired_at(at(1_000, 0)));
    }

    #[test]
    fn test_out_of_range_expiry_counts_as_expired() {
        let claims = claims(i64::MAX);
        assert!(claims.checked_expires_at().is_none());
        assert!(claims.is_expired_at(at(1_000, 0)));
        assert_eq!(claims.remaining_ttl(at(1_000, 0)), Duration::ZERO);
    }
}
