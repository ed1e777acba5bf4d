//! # userhub-core
//!
//! Core crate for UserHub. Contains the capability traits implemented by
//! the storage crates, configuration schemas, the injectable clock, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other UserHub crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
