//! Session lifecycle: login, authenticate, logout, change password, refresh.

pub mod bearer;
pub mod manager;

pub use bearer::extract_bearer;
pub use manager::SessionManager;
