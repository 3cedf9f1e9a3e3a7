//! Clickable links embedded in emails and redirect targets
//!
//! Links that the server handles itself (verify email, approve admin) point
//! at the API origin. Pages rendered by the client (reset form, result pages)
//! point at the public origin. A base URL may carry a path prefix, which is
//! kept.

use chronicle_core::config::LinkConfig;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
#[error("Invalid base URL {url:?}: {source}")]
pub struct LinkError {
    url: String,
    #[source]
    source: url::ParseError,
}

/// Builds absolute URLs from the configured origins
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    public_base: Url,
    api_base: Url,
}

fn parse_base(raw: &str) -> Result<Url, LinkError> {
    let url = Url::parse(raw.trim()).map_err(|source| LinkError {
        url: raw.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(LinkError {
            url: raw.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }
    Ok(url)
}

/// `base` + `/segments...` + `?query`
fn build(base: &Url, segments: &[&str], query: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url
}

impl LinkBuilder {
    pub fn new(config: &LinkConfig) -> Result<Self, LinkError> {
        Ok(Self {
            public_base: parse_base(&config.public_base_url)?,
            api_base: parse_base(&config.api_base_url)?,
        })
    }

    /// Link mailed after signup; consumed by `GET /auth/verify-email`
    pub fn email_verification(&self, token: &str) -> Url {
        build(&self.api_base, &["auth", "verify-email"], &[("token", token)])
    }

    /// Client page that posts the new password to `/auth/reset-password`
    pub fn password_reset(&self, token: &str) -> Url {
        build(&self.public_base, &["reset-password"], &[("token", token)])
    }

    /// Link mailed to the super admin; consumed by `GET /auth/admin/approve`
    pub fn admin_approval(&self, token: &str) -> Url {
        build(&self.api_base, &["auth", "admin", "approve"], &[("token", token)])
    }

    pub fn verify_email_success(&self) -> Url {
        build(&self.public_base, &["verify-email"], &[("success", "true")])
    }

    pub fn verify_email_failure(&self, code: &str) -> Url {
        build(
            &self.public_base,
            &["verify-email"],
            &[("success", "false"), ("error", code)],
        )
    }

    pub fn approval_success(&self) -> Url {
        build(&self.public_base, &["admin", "approval-success"], &[])
    }

    pub fn approval_failure(&self, code: &str) -> Url {
        build(
            &self.public_base,
            &["admin", "approval-failed"],
            &[("error", code)],
        )
    }
}
