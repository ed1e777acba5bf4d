//! Capability traits defined in `userhub-core` and implemented by other crates.

pub mod cache;
pub mod revocation;

pub use cache::CacheProvider;
pub use revocation::RevocationStore;
