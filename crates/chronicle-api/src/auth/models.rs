//! Account models for users and admins
//!
//! Users and admins live in separate tables. A token's `role` decides
//! which table a consuming route looks in, expressed here as
//! [`PrincipalKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Principal role carried in session and password-reset tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Admin and super admin
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    /// Table holding principals of this role
    pub fn kind(&self) -> PrincipalKind {
        if self.is_admin() {
            PrincipalKind::Admin
        } else {
            PrincipalKind::User
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "super_admin" | "superadmin" => Ok(Role::SuperAdmin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Which principal table an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    User,
    Admin,
}

/// How a user account authenticates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Email,
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Email => "email",
            AuthProvider::Google => "google",
        }
    }
}

impl std::str::FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(AuthProvider::Email),
            "google" => Ok(AuthProvider::Google),
            other => Err(format!("Unknown auth type: {other}")),
        }
    }
}

/// User account
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// Argon2id PHC hash; `None` for Google accounts
    pub password_hash: Option<String>,
    pub auth_provider: AuthProvider,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub auth_provider: AuthProvider,
    pub is_email_verified: bool,
}

/// Back-office admin account
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    /// Present only on super admins
    pub super_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn role(&self) -> Role {
        if self.super_key.is_some() {
            Role::SuperAdmin
        } else {
            Role::Admin
        }
    }
}

/// Fields needed to create an admin
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password_hash: String,
    pub super_key: Option<String>,
}

/// A user or an admin, looked up by id and kind
#[derive(Debug, Clone)]
pub enum PrincipalRecord {
    User(User),
    Admin(Admin),
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub auth_provider: AuthProvider,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            auth_provider: user.auth_provider,
            is_verified: user.is_email_verified,
            created_at: user.created_at,
        }
    }
}

/// Public view of an admin (never includes the hash or super key)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.to_string(),
            email: admin.email.clone(),
            role: admin.role(),
            created_at: admin.created_at,
        }
    }
}
