//! Authentication service layer
//!
//! Business logic behind the `/auth` and `/admin` routes: account creation,
//! credential checks, the emailed-token flows (verification, reset, admin
//! approval) and admin management. Handlers stay thin and only translate
//! HTTP in and out.
//!
//! The two browser-navigated flows (`verify_email`, `admin_approve`) return a
//! typed failure instead of [`AppError`]; their handlers render it as a
//! redirect.

use super::claims::{TokenClaims, TokenIntent};
use super::jwt::TokenCodec;
use super::middleware::{AdminPrincipal, Principal};
use super::models::{
    AdminInfo, AuthProvider, NewAdmin, NewUser, PrincipalRecord, Role, User, UserInfo,
};
use super::password::{hash_password_blocking, verify_password_blocking};
use super::repository::{PrincipalRepository, RepositoryError};
use super::tokens::{
    mint_admin_approval_token, mint_email_verification_token, mint_password_reset_token,
    mint_session_token,
};
use crate::audit::{audit_log, AuditEvent};
use crate::error::AppError;
use crate::identity::{IdentityProvider, VerifiedIdentity};
use crate::links::LinkBuilder;
use crate::mail::{MailMessage, Mailer};
use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const GOOGLE_ACCOUNT: &str = "This account uses Google sign-in";
const INVALID_TOKEN: &str = "Invalid or expired token";

// ============================================================================
// Requests and responses
// ============================================================================

/// Email/password signup
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// `email` (default); Google accounts sign up through `/auth/google/signup`
    #[serde(default)]
    pub auth_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Session issued to a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub user: UserInfo,
}

/// Authorization code from the Google sign-in popup
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GoogleAuthRequest {
    #[validate(length(min = 1, message = "Authorization code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Which account table to look in; absent means `user`
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdminSignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub token: String,
    pub role: Role,
    pub user_id: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Account behind a session token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminInfo>,
}

// ============================================================================
// Redirect flow failures
// ============================================================================

/// Why an email verification link was not honored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyEmailFailure {
    MissingToken,
    InvalidToken,
    WrongIntent,
    UserNotFound,
    AlreadyVerified,
    ServerError,
}

impl VerifyEmailFailure {
    /// Value of the `error` query parameter on the result page
    pub fn code(&self) -> &'static str {
        match self {
            VerifyEmailFailure::MissingToken => "missing_token",
            VerifyEmailFailure::InvalidToken => "invalid_token",
            VerifyEmailFailure::WrongIntent => "wrong_intent",
            VerifyEmailFailure::UserNotFound => "user_not_found",
            VerifyEmailFailure::AlreadyVerified => "already_verified",
            VerifyEmailFailure::ServerError => "server_error",
        }
    }
}

/// Why an admin approval link was not honored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalFailure {
    MissingToken,
    InvalidToken,
    WrongIntent,
    MissingClaims,
    AdminExists,
    ServerError,
}

impl ApprovalFailure {
    pub fn code(&self) -> &'static str {
        match self {
            ApprovalFailure::MissingToken => "missing_token",
            ApprovalFailure::InvalidToken => "invalid_token",
            ApprovalFailure::WrongIntent => "wrong_intent",
            ApprovalFailure::MissingClaims => "missing_claims",
            ApprovalFailure::AdminExists => "admin_exists",
            ApprovalFailure::ServerError => "server_error",
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Authentication service
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn PrincipalRepository>,
    codec: Arc<TokenCodec>,
    mailer: Arc<dyn Mailer>,
    identity: Arc<dyn IdentityProvider>,
    links: LinkBuilder,
    super_admin_email: Option<String>,
}

impl AuthService {
    pub fn new(
        repo: Arc<dyn PrincipalRepository>,
        codec: Arc<TokenCodec>,
        mailer: Arc<dyn Mailer>,
        identity: Arc<dyn IdentityProvider>,
        links: LinkBuilder,
        super_admin_email: Option<String>,
    ) -> Self {
        Self {
            repo,
            codec,
            mailer,
            identity,
            links,
            super_admin_email,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Create an email/password account and start a session
    ///
    /// The verification email is best effort: a delivery failure is logged
    /// and the account is kept.
    pub async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, AppError> {
        let provider = match request.auth_type.as_deref() {
            None => AuthProvider::Email,
            Some(raw) => raw
                .parse::<AuthProvider>()
                .map_err(|_| AppError::NotFound(format!("Unknown auth type: {raw}")))?,
        };
        if provider != AuthProvider::Email {
            return Err(AppError::Validation(
                "Google accounts sign up through /auth/google/signup".to_string(),
            ));
        }
        request.validate()?;

        let password_hash = hash_password_blocking(request.password).await?;
        let user = self
            .repo
            .create_user(NewUser {
                full_name: request.full_name.trim().to_string(),
                email: request.email.trim().to_string(),
                password_hash: Some(password_hash),
                auth_provider: AuthProvider::Email,
                is_email_verified: false,
            })
            .await?;
        let user_id = user.id.to_string();

        audit_log(&AuditEvent::SignupSuccess {
            user_id: user_id.clone(),
            email: user.email.clone(),
            provider: AuthProvider::Email.as_str().to_string(),
        });

        if let Err(e) = self.send_verification_email(&user_id, &user.email, &user.full_name).await {
            warn!(user_id = %user_id, error = %e, "Verification email not sent");
        }

        let token = mint_session_token(&self.codec, &user_id, Role::User)?;
        Ok(SignupResponse { token, user_id })
    }

    async fn send_verification_email(
        &self,
        user_id: &str,
        email: &str,
        full_name: &str,
    ) -> Result<(), AppError> {
        let token = mint_email_verification_token(&self.codec, user_id)?;
        let link = self.links.email_verification(&token);
        self.mailer
            .send(MailMessage::email_verification(email, full_name, link.as_str()))
            .await?;
        Ok(())
    }

    /// Email/password login
    ///
    /// Unverified accounts get a session too; clients read `user.isVerified`.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let Some(user) = self.repo.find_user_by_email(&request.email).await? else {
            return Err(login_failure(&request.email, INVALID_CREDENTIALS));
        };

        let Some(password_hash) = user
            .password_hash
            .clone()
            .filter(|_| user.auth_provider == AuthProvider::Email)
        else {
            return Err(login_failure(&request.email, GOOGLE_ACCOUNT));
        };

        if !verify_password_blocking(request.password, password_hash).await {
            return Err(login_failure(&request.email, INVALID_CREDENTIALS));
        }

        self.user_session(&user)
    }

    fn user_session(&self, user: &User) -> Result<LoginResponse, AppError> {
        let user_id = user.id.to_string();
        let token = mint_session_token(&self.codec, &user_id, Role::User)?;

        audit_log(&AuditEvent::LoginSuccess {
            principal_id: user_id.clone(),
            email: user.email.clone(),
            role: Role::User,
        });

        Ok(LoginResponse {
            token,
            user_id,
            user: UserInfo::from(user),
        })
    }

    async fn exchange_google_code(&self, code: &str) -> Result<VerifiedIdentity, AppError> {
        Ok(self.identity.exchange_code(code).await?)
    }

    /// Sign in with Google; the account must already exist
    pub async fn google_login(&self, request: GoogleAuthRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;
        let identity = self.exchange_google_code(&request.code).await?;

        let Some(user) = self.repo.find_user_by_email(&identity.email).await? else {
            return Err(login_failure(
                &identity.email,
                "No account found for this Google user",
            ));
        };

        self.user_session(&user)
    }

    /// Create an account from a Google identity and start a session
    pub async fn google_signup(
        &self,
        request: GoogleAuthRequest,
    ) -> Result<LoginResponse, AppError> {
        request.validate()?;
        let identity = self.exchange_google_code(&request.code).await?;

        let user = self
            .repo
            .create_user(NewUser {
                full_name: identity.name,
                email: identity.email,
                password_hash: None,
                auth_provider: AuthProvider::Google,
                is_email_verified: identity.email_verified,
            })
            .await?;

        audit_log(&AuditEvent::SignupSuccess {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            provider: AuthProvider::Google.as_str().to_string(),
        });

        self.user_session(&user)
    }

    /// Mail a password reset link for a user or admin account
    pub async fn request_password_reset(
        &self,
        request: PasswordResetRequest,
    ) -> Result<MessageResponse, AppError> {
        request.validate()?;

        let (subject_id, role, email) = match request.role.unwrap_or(Role::User) {
            Role::User => {
                let user = self
                    .repo
                    .find_user_by_email(&request.email)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
                (user.id.to_string(), Role::User, user.email)
            }
            Role::Admin | Role::SuperAdmin => {
                let admin = self
                    .repo
                    .find_admin_by_email(&request.email)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;
                (admin.id.to_string(), admin.role(), admin.email)
            }
        };

        let token = mint_password_reset_token(&self.codec, &subject_id, role)?;
        let link = self.links.password_reset(&token);
        self.mailer
            .send(MailMessage::password_reset(&email, link.as_str()))
            .await?;

        audit_log(&AuditEvent::PasswordResetRequested {
            principal_id: subject_id,
            role,
        });

        Ok(MessageResponse::new("Password reset email sent"))
    }

    /// Set a new password using a reset token from the query string
    pub async fn reset_password(
        &self,
        token: Option<&str>,
        request: ResetPasswordRequest,
    ) -> Result<MessageResponse, AppError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("Token is required".to_string()))?;
        request.validate()?;

        let payload = self.codec.verify(token)?;
        let Ok(TokenClaims::PasswordReset { subject_id, role }) = TokenClaims::try_from(payload)
        else {
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        };

        let password_hash = hash_password_blocking(request.password).await?;
        let updated = self
            .repo
            .update_password(&subject_id, role.kind(), &password_hash)
            .await?;
        if !updated {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        audit_log(&AuditEvent::PasswordResetCompleted {
            principal_id: subject_id,
            role,
        });

        Ok(MessageResponse::new("Password has been reset"))
    }

    /// Consume an email verification token
    pub async fn verify_email(&self, token: Option<&str>) -> Result<(), VerifyEmailFailure> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(VerifyEmailFailure::MissingToken)?;
        let payload = self
            .codec
            .verify(token)
            .map_err(|_| VerifyEmailFailure::InvalidToken)?;

        if payload.intent != Some(TokenIntent::EmailVerification) {
            return Err(VerifyEmailFailure::WrongIntent);
        }
        let Ok(TokenClaims::EmailVerification { user_id }) = TokenClaims::try_from(payload) else {
            return Err(VerifyEmailFailure::InvalidToken);
        };

        let user = self
            .repo
            .find_user_by_id(&user_id)
            .await
            .map_err(verify_server_error)?
            .ok_or(VerifyEmailFailure::UserNotFound)?;

        if user.is_email_verified {
            return Err(VerifyEmailFailure::AlreadyVerified);
        }

        if !self
            .repo
            .mark_email_verified(&user_id)
            .await
            .map_err(verify_server_error)?
        {
            return Err(VerifyEmailFailure::UserNotFound);
        }

        audit_log(&AuditEvent::EmailVerified { user_id });
        Ok(())
    }

    /// Ask the super admin to approve a new admin account
    ///
    /// Nothing is stored: the applicant's email and password hash travel
    /// inside the two approval tokens.
    pub async fn admin_signup_request(
        &self,
        request: AdminSignupRequest,
    ) -> Result<MessageResponse, AppError> {
        request.validate()?;

        let approver = self
            .super_admin_email
            .as_deref()
            .ok_or_else(|| AppError::internal("SUPER_ADMIN_EMAIL is not configured"))?;

        let email = request.email.trim().to_string();
        if self.repo.find_admin_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Admin already exists".to_string()));
        }

        let password_hash = hash_password_blocking(request.password).await?;
        let admin_token = mint_admin_approval_token(&self.codec, &email, &password_hash, false)?;
        let super_token = mint_admin_approval_token(&self.codec, &email, &password_hash, true)?;

        let message = MailMessage::admin_approval_request(
            approver,
            &email,
            self.links.admin_approval(&admin_token).as_str(),
            self.links.admin_approval(&super_token).as_str(),
        );
        self.mailer.send(message).await?;

        audit_log(&AuditEvent::AdminSignupRequested { email });
        Ok(MessageResponse::new("Admin signup request sent for approval"))
    }

    /// Consume an admin approval token and create the admin
    pub async fn admin_approve(&self, token: Option<&str>) -> Result<(), ApprovalFailure> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(ApprovalFailure::MissingToken)?;
        let payload = self
            .codec
            .verify(token)
            .map_err(|_| ApprovalFailure::InvalidToken)?;

        if payload.intent != Some(TokenIntent::AdminApproval) {
            return Err(ApprovalFailure::WrongIntent);
        }
        let Ok(TokenClaims::AdminApproval {
            email,
            password_hash,
            grant_super_admin,
        }) = TokenClaims::try_from(payload)
        else {
            return Err(ApprovalFailure::MissingClaims);
        };

        if self
            .repo
            .find_admin_by_email(&email)
            .await
            .map_err(approval_server_error)?
            .is_some()
        {
            return Err(ApprovalFailure::AdminExists);
        }

        let super_key = grant_super_admin.then(generate_super_key);
        let admin = self
            .repo
            .create_admin(NewAdmin {
                email,
                password_hash,
                super_key,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::EmailAlreadyExists => ApprovalFailure::AdminExists,
                other => approval_server_error(other),
            })?;

        info!(admin_id = %admin.id, role = %admin.role(), "Admin account created");
        audit_log(&AuditEvent::AdminApproved {
            admin_id: admin.id.to_string(),
            email: admin.email,
            super_admin: grant_super_admin,
        });
        Ok(())
    }

    pub async fn admin_login(
        &self,
        request: AdminLoginRequest,
    ) -> Result<AdminLoginResponse, AppError> {
        request.validate()?;

        let Some(admin) = self.repo.find_admin_by_email(&request.email).await? else {
            return Err(login_failure(&request.email, INVALID_CREDENTIALS));
        };

        if !verify_password_blocking(request.password, admin.password_hash.clone()).await {
            return Err(login_failure(&request.email, INVALID_CREDENTIALS));
        }

        let role = admin.role();
        let user_id = admin.id.to_string();
        let token = mint_session_token(&self.codec, &user_id, role)?;

        audit_log(&AuditEvent::LoginSuccess {
            principal_id: user_id.clone(),
            email: admin.email,
            role,
        });

        Ok(AdminLoginResponse {
            token,
            role,
            user_id,
        })
    }

    /// Account behind an authenticated principal
    pub async fn profile(&self, principal: &Principal) -> Result<ProfileResponse, AppError> {
        let role = principal.role.unwrap_or(Role::User);

        let record = self
            .repo
            .find_by_id(&principal.id, role.kind())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(match record {
            PrincipalRecord::User(user) => ProfileResponse {
                role: Role::User,
                user: Some(UserInfo::from(&user)),
                admin: None,
            },
            PrincipalRecord::Admin(admin) => ProfileResponse {
                role: admin.role(),
                user: None,
                admin: Some(AdminInfo::from(&admin)),
            },
        })
    }

    pub async fn list_admins(&self) -> Result<Vec<AdminInfo>, AppError> {
        let admins = self.repo.list_admins().await?;
        Ok(admins.iter().map(AdminInfo::from).collect())
    }

    /// Remove an admin account; callers have already required a super admin
    pub async fn delete_admin(&self, actor: &AdminPrincipal, id: &str) -> Result<(), AppError> {
        if actor.id == id {
            return Err(AppError::Validation(
                "You cannot delete your own admin account".to_string(),
            ));
        }

        if !self.repo.delete_admin(id).await? {
            return Err(AppError::NotFound("Admin not found".to_string()));
        }

        audit_log(&AuditEvent::AdminDeleted {
            admin_id: id.to_string(),
            deleted_by: actor.id.clone(),
        });
        Ok(())
    }
}

fn login_failure(email: &str, reason: &str) -> AppError {
    audit_log(&AuditEvent::LoginFailure {
        email: email.to_string(),
        reason: reason.to_string(),
    });
    AppError::Unauthorized(reason.to_string())
}

fn verify_server_error(err: RepositoryError) -> VerifyEmailFailure {
    tracing::error!(error = %err, "Email verification failed");
    VerifyEmailFailure::ServerError
}

fn approval_server_error(err: RepositoryError) -> ApprovalFailure {
    tracing::error!(error = %err, "Admin approval failed");
    ApprovalFailure::ServerError
}

/// Random 256-bit key marking an admin as super admin
fn generate_super_key() -> String {
    let mut rng = rand::thread_rng();
    let key_bytes: [u8; 32] = rng.gen();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(key_bytes)
}
