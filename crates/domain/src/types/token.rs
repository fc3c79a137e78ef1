//! Access token value objects
//!
//! An [`AccessToken`] is never mutated after creation; a token provider
//! replaces it wholesale once it expires.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ForgeError, Result};

/// Bearer credential together with its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Opaque token sent as `Authorization: Bearer <access_token>`
    pub access_token: String,

    /// Token type reported by the server (always "Bearer" in practice)
    pub token_type: String,

    /// Absolute expiry; `None` means the token never expires locally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Refresh token, issued by three-legged flows only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Token without an expiry, as handed out by a static provider
    #[must_use]
    pub fn non_expiring(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Build a token from an authentication response received at `issued_at`
    ///
    /// `expires_at = issued_at + expires_in`.
    ///
    /// # Errors
    /// Returns `ForgeError::MalformedResponse` if `expires_in` does not yield
    /// a representable expiry.
    pub fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> Result<Self> {
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ForgeError::MalformedResponse(format!(
                    "token expires_in out of range: {}",
                    response.expires_in
                ))
            })?;

        Ok(Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_at: Some(expires_at),
            refresh_token: response.refresh_token,
        })
    }

    /// `true` while `now` is strictly before the expiry
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Token response from `/authenticate`, `/gettoken` and `/refreshtoken`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}
