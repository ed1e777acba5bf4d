//! # userhub-database
//!
//! PostgreSQL connection management and the user persistence collaborator.
//! The [`UserStore`] trait is what the rest of the system depends on; the
//! in-memory implementation exists for tests and local runs.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{MemoryUserRepository, UserRepository, UserStore};
