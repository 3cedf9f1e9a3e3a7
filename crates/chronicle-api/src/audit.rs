//! Security audit logging for authentication events
//!
//! All audit events are logged at INFO level with the "audit" target,
//! making them easy to filter and route to security monitoring systems.
//! Each record carries the event serialized as JSON in the `event` field.
//!
//! ```ignore
//! use chronicle_api::audit::{audit_log, AuditEvent};
//!
//! audit_log(&AuditEvent::LoginSuccess {
//!     principal_id: user.id.to_string(),
//!     email: user.email.clone(),
//!     role: Role::User,
//! });
//! ```
//!
//! Author: Chronicle Team

use crate::auth::models::Role;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Security audit events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    SignupSuccess {
        user_id: String,
        email: String,
        provider: String,
    },

    LoginSuccess {
        principal_id: String,
        email: String,
        role: Role,
    },

    LoginFailure {
        email: String,
        reason: String,
    },

    /// Missing, malformed, expired or wrong-shape bearer token
    InvalidToken {
        reason: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    },

    AccessDenied {
        principal_id: String,
        required_role: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    },

    EmailVerified {
        user_id: String,
    },

    PasswordResetRequested {
        principal_id: String,
        role: Role,
    },

    PasswordResetCompleted {
        principal_id: String,
        role: Role,
    },

    AdminSignupRequested {
        email: String,
    },

    AdminApproved {
        admin_id: String,
        email: String,
        super_admin: bool,
    },

    AdminDeleted {
        admin_id: String,
        deleted_by: String,
    },
}

impl AuditEvent {
    fn description(&self) -> &'static str {
        match self {
            AuditEvent::SignupSuccess { .. } => "Signup successful",
            AuditEvent::LoginSuccess { .. } => "Login successful",
            AuditEvent::LoginFailure { .. } => "Login failed",
            AuditEvent::InvalidToken { .. } => "Invalid token presented",
            AuditEvent::AccessDenied { .. } => "Access denied",
            AuditEvent::EmailVerified { .. } => "Email verified",
            AuditEvent::PasswordResetRequested { .. } => "Password reset requested",
            AuditEvent::PasswordResetCompleted { .. } => "Password reset completed",
            AuditEvent::AdminSignupRequested { .. } => "Admin signup requested",
            AuditEvent::AdminApproved { .. } => "Admin approved",
            AuditEvent::AdminDeleted { .. } => "Admin deleted",
        }
    }
}

/// Log a security audit event with structured fields
pub fn audit_log(event: &AuditEvent) {
    let event_json = serde_json::to_string(event)
        .unwrap_or_else(|e| format!("{{\"error\":\"Failed to serialize audit event: {e}\"}}"));

    info!(
        target: "audit",
        event = %event_json,
        "{}",
        event.description()
    );
}

/// Extract client IP address from request headers
///
/// Checks X-Forwarded-For, then X-Real-IP.
pub fn extract_ip_address(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            // X-Forwarded-For can contain multiple IPs; the first is the client
            if let Some(ip) = forwarded_str.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return Some(ip.to_string());
                }
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extract user agent from request headers
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
