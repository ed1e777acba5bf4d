//! # userhub-entity
//!
//! Domain entity models for UserHub. Every struct in this crate represents a
//! database table row or the input needed to produce one. Database entities
//! derive `sqlx::FromRow`.

pub mod user;
