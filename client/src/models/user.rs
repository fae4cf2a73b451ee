//! User account model and authentication payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access role assigned to an account by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular policyholder.
    User,
    /// Back-office administrator.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("USER"),
            Self::Admin => f.write_str("ADMIN"),
        }
    }
}

/// Application user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user identifier.
    pub id: i64,
    /// Full name shown in the portal.
    pub name: String,
    /// Login email, unique per account.
    pub email: String,
    /// Access role.
    pub role: Role,
}

/// Successful login response: a bearer token plus the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token to attach to subsequent requests.
    pub token: String,
    /// Authenticated account.
    pub user: User,
}

/// Registration payload for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Full name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
}
