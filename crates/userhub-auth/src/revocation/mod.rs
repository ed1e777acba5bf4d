//! Token revocation backed by the shared key-value store.

pub mod cache_store;

pub use cache_store::CacheRevocationStore;
