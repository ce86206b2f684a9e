//! # User model
//!
//! [`User`] is the projection the backend returns from `GET /users/me` and
//! `GET /users/clients`. The password hash never leaves the server. [`Role`]
//! decides which dashboard the client loads after sign-in.
//!
//! [`NewClient`] is the body of `POST /users/`, which architects use to create
//! accounts for their customers.

use serde::{Deserialize, Serialize};

/// Account role. Anything the backend sends that is not `"architect"` is
/// treated as a client, matching how the dashboard routes unknown roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Architect,
    Client,
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "architect" => Role::Architect,
            _ => Role::Client,
        }
    }
}

/// User information returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_architect(&self) -> bool {
        self.role == Role::Architect
    }
}

/// Body of `POST /users/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewClient {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Role::Client,
        }
    }
}

/// Successful response of `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}
