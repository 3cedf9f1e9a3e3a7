use super::{PrincipalRepository, RepositoryError};
use crate::auth::models::{Admin, NewAdmin, NewUser, PrincipalKind, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local repository
///
/// Used by tests and when no `DATABASE_URL` is configured. Contents are lost
/// on restart.
#[derive(Debug, Default)]
pub struct InMemoryPrincipalRepository {
    users: RwLock<HashMap<Uuid, User>>,
    admins: RwLock<HashMap<Uuid, Admin>>,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn same_email(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| same_email(&u.email, email)).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(RepositoryError::EmailAlreadyExists);
        }

        let created = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            auth_provider: user.auth_provider,
            is_email_verified: user.is_email_verified,
            created_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn mark_email_verified(&self, id: &str) -> Result<bool, RepositoryError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let mut users = self.users.write().await;
        Ok(match users.get_mut(&id) {
            Some(user) => {
                user.is_email_verified = true;
                true
            }
            None => false,
        })
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        let admins = self.admins.read().await;
        Ok(admins.values().find(|a| same_email(&a.email, email)).cloned())
    }

    async fn find_admin_by_id(&self, id: &str) -> Result<Option<Admin>, RepositoryError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.admins.read().await.get(&id).cloned())
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, RepositoryError> {
        let mut admins = self.admins.write().await;
        if admins.values().any(|a| same_email(&a.email, &admin.email)) {
            return Err(RepositoryError::EmailAlreadyExists);
        }

        let created = Admin {
            id: Uuid::new_v4(),
            email: admin.email,
            password_hash: admin.password_hash,
            super_key: admin.super_key,
            created_at: Utc::now(),
        };
        admins.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, RepositoryError> {
        let mut admins: Vec<Admin> = self.admins.read().await.values().cloned().collect();
        admins.sort_by_key(|a| a.created_at);
        Ok(admins)
    }

    async fn delete_admin(&self, id: &str) -> Result<bool, RepositoryError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        Ok(self.admins.write().await.remove(&id).is_some())
    }

    async fn update_password(
        &self,
        id: &str,
        kind: PrincipalKind,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let updated = match kind {
            PrincipalKind::User => self.users.write().await.get_mut(&id).map(|user| {
                user.password_hash = Some(password_hash.to_string());
            }),
            PrincipalKind::Admin => self.admins.write().await.get_mut(&id).map(|admin| {
                admin.password_hash = password_hash.to_string();
            }),
        };
        Ok(updated.is_some())
    }
}
