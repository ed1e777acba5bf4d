//! # userhub-auth
//!
//! Authentication and session lifecycle for UserHub.
//!
//! ## Modules
//!
//! - `jwt`: signed, time-bounded identity tokens (issue, verify, refresh)
//! - `revocation`: blacklist of tokens withdrawn before their natural expiry
//! - `password`: Argon2id password hashing
//! - `session`: login, authenticate, logout, change password, refresh

pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenCodec};
pub use password::PasswordHasher;
pub use revocation::CacheRevocationStore;
pub use session::{SessionManager, extract_bearer};
