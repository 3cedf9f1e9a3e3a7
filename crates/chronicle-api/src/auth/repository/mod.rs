//! Persistence for users and admins
//!
//! [`PrincipalRepository`] is the seam between the auth service and storage.
//! [`PgPrincipalRepository`] backs production; [`InMemoryPrincipalRepository`]
//! serves tests and database-less local runs.
//!
//! Emails are compared case-insensitively; callers pass them as received.

mod memory;
mod postgres;

pub use memory::InMemoryPrincipalRepository;
pub use postgres::PgPrincipalRepository;

use super::models::{Admin, NewAdmin, NewUser, PrincipalKind, PrincipalRecord, User};
use async_trait::async_trait;
use thiserror::Error;

/// Repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Email already exists")]
    EmailAlreadyExists,
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::DatabaseError(err.to_string())
    }
}

/// Storage for both principal tables
///
/// Lookups by id take the id as received from a token. An id that is not a
/// valid UUID simply finds nothing.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    /// Insert a user; a taken email yields [`RepositoryError::EmailAlreadyExists`]
    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Set `is_email_verified`; `false` if no such user
    async fn mark_email_verified(&self, id: &str) -> Result<bool, RepositoryError>;

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError>;

    async fn find_admin_by_id(&self, id: &str) -> Result<Option<Admin>, RepositoryError>;

    /// Insert an admin; a taken email yields [`RepositoryError::EmailAlreadyExists`]
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, RepositoryError>;

    /// All admins, oldest first
    async fn list_admins(&self) -> Result<Vec<Admin>, RepositoryError>;

    /// `false` if no such admin
    async fn delete_admin(&self, id: &str) -> Result<bool, RepositoryError>;

    /// Replace a principal's password hash; `false` if no such principal
    async fn update_password(
        &self,
        id: &str,
        kind: PrincipalKind,
        password_hash: &str,
    ) -> Result<bool, RepositoryError>;

    /// Look up a principal in the table selected by `kind`
    async fn find_by_id(
        &self,
        id: &str,
        kind: PrincipalKind,
    ) -> Result<Option<PrincipalRecord>, RepositoryError> {
        Ok(match kind {
            PrincipalKind::User => self.find_user_by_id(id).await?.map(PrincipalRecord::User),
            PrincipalKind::Admin => self.find_admin_by_id(id).await?.map(PrincipalRecord::Admin),
        })
    }
}
