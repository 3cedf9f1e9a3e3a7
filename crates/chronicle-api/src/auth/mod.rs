//! Authentication and authorization module
//!
//! This module provides JWT-based authentication with the following components:
//! - Password hashing with Argon2
//! - One token codec shared by sessions and emailed links
//! - Intent-specific token constructors
//! - Middleware for request authentication and the admin role gate
//! - Authentication service for account flows
//! - Repository layer for users and admins

pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod tokens;

pub use claims::{ClaimsError, TokenClaims, TokenIntent, TokenPayload};
pub use jwt::{TokenCodec, TokenError, VerifiedToken};
pub use middleware::{
    authenticate, authenticate_as_admin, require_admin, require_auth, AdminPrincipal, AuthError,
    Principal,
};
pub use models::{Admin, AdminInfo, AuthProvider, PrincipalKind, Role, User, UserInfo};
pub use password::{hash_password, verify_password, PasswordError};
pub use repository::{
    InMemoryPrincipalRepository, PgPrincipalRepository, PrincipalRepository, RepositoryError,
};
pub use service::{ApprovalFailure, AuthService, VerifyEmailFailure};
pub use tokens::{
    mint_admin_approval_token, mint_email_verification_token, mint_password_reset_token,
    mint_session_token,
};
