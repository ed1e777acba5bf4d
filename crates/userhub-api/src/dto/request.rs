//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Account registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Email address.
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "email is invalid")
    )]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Partial profile update. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Password change body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "old_password is required"))]
    pub old_password: String,
    /// Replacement password.
    #[validate(length(min = 1, message = "new_password is required"))]
    pub new_password: String,
}
