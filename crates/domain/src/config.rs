//! Configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::{
    ACCOUNT_MANAGEMENT_PATH, ACCOUNT_MANAGEMENT_V2_PATH, AUTHENTICATION_PATH, BIM360_ADMIN_PATH,
    DATA_MANAGEMENT_DATA_PATH, DATA_MANAGEMENT_PATH, DEFAULT_HOST, DEFAULT_TIMEOUT_SECS,
    DOCUMENT_MANAGEMENT_PATH, MODEL_DERIVATIVE_PATH, OSS_PATH, RELATIONSHIPS_PATH, REVIEWS_PATH,
    WEBHOOKS_PATH,
};
use crate::errors::{ForgeError, Result};

/// SDK configuration
///
/// Every field has a default except the app credentials, which are only
/// required by the caching token provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<String>,

    /// Scheme and host shared by all services
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            host: default_host(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: None,
        }
    }
}

impl ForgeConfig {
    /// App credentials as `(client_id, client_secret)`
    ///
    /// # Errors
    /// Returns `ForgeError::Config` if either value is missing or empty.
    pub fn credentials(&self) -> Result<(String, String)> {
        let client_id = non_blank(self.client_id.as_deref())
            .ok_or_else(|| ForgeError::Config("client_id is not configured".to_string()))?;
        let client_secret = non_blank(self.client_secret.as_deref())
            .ok_or_else(|| ForgeError::Config("client_secret is not configured".to_string()))?;
        Ok((client_id.to_string(), client_secret.to_string()))
    }

    /// Base URL for a service path prefix
    #[must_use]
    pub fn service_url(&self, path: &str) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), path)
    }

    #[must_use]
    pub fn authentication_url(&self) -> String {
        self.service_url(AUTHENTICATION_PATH)
    }

    #[must_use]
    pub fn oss_url(&self) -> String {
        self.service_url(OSS_PATH)
    }

    #[must_use]
    pub fn data_management_url(&self) -> String {
        self.service_url(DATA_MANAGEMENT_PATH)
    }

    /// Folders, items and versions (`/data/v1`)
    #[must_use]
    pub fn data_management_data_url(&self) -> String {
        self.service_url(DATA_MANAGEMENT_DATA_PATH)
    }

    #[must_use]
    pub fn model_derivative_url(&self) -> String {
        self.service_url(MODEL_DERIVATIVE_PATH)
    }

    #[must_use]
    pub fn webhooks_url(&self) -> String {
        self.service_url(WEBHOOKS_PATH)
    }

    #[must_use]
    pub fn document_management_url(&self) -> String {
        self.service_url(DOCUMENT_MANAGEMENT_PATH)
    }

    #[must_use]
    pub fn account_management_url(&self) -> String {
        self.service_url(ACCOUNT_MANAGEMENT_PATH)
    }

    #[must_use]
    pub fn account_management_v2_url(&self) -> String {
        self.service_url(ACCOUNT_MANAGEMENT_V2_PATH)
    }

    #[must_use]
    pub fn bim360_admin_url(&self) -> String {
        self.service_url(BIM360_ADMIN_PATH)
    }

    #[must_use]
    pub fn relationships_url(&self) -> String {
        self.service_url(RELATIONSHIPS_PATH)
    }

    #[must_use]
    pub fn reviews_url(&self) -> String {
        self.service_url(REVIEWS_PATH)
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
