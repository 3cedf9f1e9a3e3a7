use super::{PrincipalRepository, RepositoryError};
use crate::auth::models::{Admin, AuthProvider, NewAdmin, NewUser, PrincipalKind, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed repository
///
/// Expects the schema in `migrations/`; call [`PgPrincipalRepository::migrate`]
/// once at startup.
#[derive(Debug, Clone)]
pub struct PgPrincipalRepository {
    pool: PgPool,
}

impl PgPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}

const USER_COLUMNS: &str =
    "id, full_name, email, password_hash, auth_provider, is_email_verified, created_at";

const ADMIN_COLUMNS: &str = "id, email, password_hash, super_key, created_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    full_name: String,
    email: String,
    password_hash: Option<String>,
    auth_provider: String,
    is_email_verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let auth_provider: AuthProvider = row
            .auth_provider
            .parse()
            .map_err(RepositoryError::DatabaseError)?;

        Ok(User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            password_hash: row.password_hash,
            auth_provider,
            is_email_verified: row.is_email_verified,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password_hash: String,
    super_key: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            super_key: row.super_key,
            created_at: row.created_at,
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

fn insert_error(err: sqlx::Error) -> RepositoryError {
    if is_unique_violation(&err) {
        RepositoryError::EmailAlreadyExists
    } else {
        err.into()
    }
}

#[async_trait]
impl PrincipalRepository for PgPrincipalRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO users (full_name, email, password_hash, auth_provider, is_email_verified)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.auth_provider.as_str())
            .bind(user.is_email_verified)
            .fetch_one(&self.pool)
            .await
            .map_err(insert_error)?;

        User::try_from(row)
    }

    async fn mark_email_verified(&self, id: &str) -> Result<bool, RepositoryError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query("UPDATE users SET is_email_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        let query = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE lower(email) = lower($1)");
        let row = sqlx::query_as::<_, AdminRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Admin::from))
    }

    async fn find_admin_by_id(&self, id: &str) -> Result<Option<Admin>, RepositoryError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let query = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1");
        let row = sqlx::query_as::<_, AdminRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Admin::from))
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO admins (email, password_hash, super_key)
            VALUES ($1, $2, $3)
            RETURNING {ADMIN_COLUMNS}
            "
        );

        let row = sqlx::query_as::<_, AdminRow>(&query)
            .bind(&admin.email)
            .bind(&admin.password_hash)
            .bind(&admin.super_key)
            .fetch_one(&self.pool)
            .await
            .map_err(insert_error)?;

        Ok(row.into())
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, RepositoryError> {
        let query = format!("SELECT {ADMIN_COLUMNS} FROM admins ORDER BY created_at");
        let rows = sqlx::query_as::<_, AdminRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Admin::from).collect())
    }

    async fn delete_admin(&self, id: &str) -> Result<bool, RepositoryError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_password(
        &self,
        id: &str,
        kind: PrincipalKind,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let query = match kind {
            PrincipalKind::User => "UPDATE users SET password_hash = $1 WHERE id = $2",
            PrincipalKind::Admin => "UPDATE admins SET password_hash = $1 WHERE id = $2",
        };

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
