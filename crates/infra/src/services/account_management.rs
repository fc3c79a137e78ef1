//! Account management clients
//!
//! The operations span three base URLs: `/hq/v1`, `/hq/v2` and
//! `/bim360/admin/v1`.

use std::sync::Arc;

use forge_domain::constants::ACCOUNT_PAGE_LIMIT;
use forge_domain::{ForgeConfig, Result};
use serde_json::Value;
use tracing::instrument;

use super::json_api;
use crate::api::ApiClient;
use crate::auth::TokenProvider;
use crate::endpoints::account_management::{
    GET_COMPANIES, GET_INDUSTRY_ROLES, GET_PROJECT_USERS, GET_USER, GET_USERS, SEARCH_COMPANIES,
};
use crate::http::HttpClient;

/// Account users, companies, roles and project users
#[derive(Clone, Debug)]
pub struct AccountManagementClient {
    hq: ApiClient,
    hq_v2: ApiClient,
    admin: ApiClient,
}

impl AccountManagementClient {
    /// Client for explicit `/hq/v1`, `/hq/v2` and `/bim360/admin/v1` base URLs
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
    pub fn new(
        hq_url: impl Into<String>,
        hq_v2_url: impl Into<String>,
        admin_url: impl Into<String>,
        auth: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        let http = HttpClient::new()?;
        Ok(Self::with_http(http, hq_url, hq_v2_url, admin_url, auth))
    }

    /// Client using the host, timeout and user agent from `config`
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
    pub fn from_config(config: &ForgeConfig, auth: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::with_http(
            http,
            config.account_management_url(),
            config.account_management_v2_url(),
            config.bim360_admin_url(),
            auth,
        ))
    }

    fn with_http(
        http: HttpClient,
        hq_url: impl Into<String>,
        hq_v2_url: impl Into<String>,
        admin_url: impl Into<String>,
        auth: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            hq: ApiClient::with_http(http.clone(), hq_url, auth.clone()),
            hq_v2: ApiClient::with_http(http.clone(), hq_v2_url, auth.clone()),
            admin: ApiClient::with_http(http, admin_url, auth),
        }
    }

    /// All users of an account, or one user when `user_id` is given
    ///
    /// # Errors
    /// Aborts with the first page error.
    pub async fn get_users(&self, account_id: &str, user_id: Option<&str>) -> Result<Value> {
        match user_id {
            Some(user_id) => self.hq.call_json(&GET_USER, &[account_id, user_id], json_api()).await,
            None => self.hq.call_json(&GET_USERS, &[account_id], json_api()).await,
        }
    }

    /// Companies matching `name`, with optional extra filters such as
    /// `trade` or `operator`
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn search_companies(
        &self,
        account_id: &str,
        name: &str,
        filters: &[(&str, &str)],
    ) -> Result<Value> {
        let options = filters
            .iter()
            .fold(json_api().param("name", name), |options, (key, value)| {
                options.param(*key, *value)
            });
        self.hq.call_json(&SEARCH_COMPANIES, &[account_id], options).await
    }

    /// Every company of an account, paged with `offset`/`limit`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_companies(&self, account_id: &str) -> Result<Vec<Value>> {
        let path = GET_COMPANIES.render(&[account_id])?;
        self.hq.get_all_offset(&path, GET_COMPANIES.scopes, json_api(), ACCOUNT_PAGE_LIMIT).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_industry_roles(&self, account_id: &str, project_id: &str) -> Result<Value> {
        self.hq_v2.call_json(&GET_INDUSTRY_ROLES, &[account_id, project_id], json_api()).await
    }

    /// Every user of a project, paged until `pagination.totalResults`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_project_users(&self, project_id: &str) -> Result<Vec<Value>> {
        let path = GET_PROJECT_USERS.render(&[project_id])?;
        self.admin
            .get_all_total_results(&path, GET_PROJECT_USERS.scopes, json_api(), ACCOUNT_PAGE_LIMIT)
            .await
    }
}
