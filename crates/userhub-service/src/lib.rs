//! # userhub-service
//!
//! Business logic service layer for UserHub. Services follow constructor
//! injection: all dependencies are provided at construction time via `Arc`
//! references.

pub mod user;

pub use user::UserService;
