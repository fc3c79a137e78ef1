//! Webhooks service client (data management system)

use forge_domain::constants::CONTENT_TYPE_JSON_API;
use forge_domain::{ForgeError, Region, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use super::{content_type, with_region};
use crate::api::ApiClient;
use crate::endpoints::webhooks::{CREATE_HOOK, DELETE_HOOK, GET_HOOKS};
use crate::http::RequestOptions;

/// Body of a hook registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// URL the service will POST notifications to
    pub callback_url: String,
    /// Extent of monitoring, e.g. `{"folder": "urn:adsk.wipprod:fs.folder:..."}`
    pub scope: Value,
    /// JsonPath expression filtering the callbacks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// ISO 8601 expiry; the hook never expires when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_expiry: Option<String>,
    /// Additional attributes sent verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookRequest {
    #[must_use]
    pub fn new(callback_url: impl Into<String>, scope: Value) -> Self {
        Self { callback_url: callback_url.into(), scope, ..Self::default() }
    }
}

/// Hooks on data management events
#[derive(Clone, Debug)]
pub struct WebhooksClient {
    api: ApiClient,
}

impl_service_client!(WebhooksClient, webhooks_url);

impl WebhooksClient {
    /// Every hook of the data system, following `links.next`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_webhooks(&self, region: Option<Region>) -> Result<Vec<Value>> {
        let options = with_region(content_type(RequestOptions::new(), "application/json"), region);
        self.api.get_all_json_api(&GET_HOOKS.render(&[])?, GET_HOOKS.scopes, options).await
    }

    /// Register a hook for `event` (e.g. `dm.version.added`)
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self, request), fields(callback = %request.callback_url))]
    pub async fn create_webhook_for_event(
        &self,
        event: &str,
        request: &WebhookRequest,
        region: Option<Region>,
    ) -> Result<Value> {
        let body = serde_json::to_value(request)
            .map_err(|err| ForgeError::Serialization(err.to_string()))?;
        let options =
            with_region(content_type(RequestOptions::new(), CONTENT_TYPE_JSON_API), region)
                .json(body);
        self.api.call_json(&CREATE_HOOK, &[event], options).await
    }

    /// Remove one hook from a system event
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn delete_webhook_for_event(
        &self,
        event: &str,
        hook_id: &str,
        region: Option<Region>,
    ) -> Result<()> {
        let options =
            with_region(content_type(RequestOptions::new(), CONTENT_TYPE_JSON_API), region);
        self.api.call(&DELETE_HOOK, &[event, hook_id], options).await?;
        Ok(())
    }
}
