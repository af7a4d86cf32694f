//! User account model and role classification.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User account as returned by the backend.
///
/// The `/login` response omits `email` for some account types, so it
/// defaults to empty on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned identifier
    pub id: i64,
    /// Unique login/display name
    pub username: String,
    /// Contact address
    #[serde(default)]
    pub email: String,
    /// Role tag as sent by the backend ("pharmacy", "government", "admin")
    pub user_type: String,
    /// For pharmacy accounts, gates write-capable actions
    #[serde(default)]
    pub is_approved: bool,
    pub pharmacy_name: Option<String>,
    pub license_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl User {
    /// Parsed role of this account, if the role tag is recognized.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.user_type)
    }
}

/// The closed set of roles this portal understands.
///
/// Anything else the backend might send is treated as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Pharmacy,
    Government,
    Admin,
}

impl Role {
    pub fn parse(tag: &str) -> Option<Role> {
        match tag {
            "pharmacy" => Some(Role::Pharmacy),
            "government" => Some(Role::Government),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pharmacy => "pharmacy",
            Role::Government => "government",
            Role::Admin => "admin",
        }
    }
}

/// Successful `/login` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: String,
    pub user: User,
}

/// Payload for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterData {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response to a generic registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub requires_approval: bool,
}

/// Payload for `POST /pharmacy/signup`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PharmacySignupData {
    #[validate(length(min = 1, message = "Pharmacy name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Owner name is required"))]
    pub owner: String,
    pub location: String,
    #[validate(length(min = 1, message = "License number is required"))]
    pub license: String,
    pub phone: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Optional custom password; the backend falls back to a default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Response to a pharmacy signup, including the generated credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct PharmacySignupResponse {
    pub message: String,
    pub credentials: PharmacyCredentials,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PharmacyCredentials {
    pub username: String,
    pub password: String,
    pub pharmacy_name: String,
}
