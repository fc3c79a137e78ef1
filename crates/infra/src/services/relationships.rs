//! BIM 360 relationships client

use forge_domain::{JsonApiPage, Result};
use serde_json::Value;
use tracing::instrument;

use super::json_api;
use crate::api::ApiClient;
use crate::endpoints::relationships::SEARCH_RELATIONSHIPS;
use crate::http::RequestOptions;

/// Relationship search within a container
#[derive(Clone, Debug)]
pub struct RelationshipsClient {
    api: ApiClient,
}

impl_service_client!(RelationshipsClient, relationships_url);

impl RelationshipsClient {
    /// One page of relationships matching `search_params`
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_relationships(
        &self,
        container_id: &str,
        search_params: &[(&str, &str)],
    ) -> Result<JsonApiPage<Value>> {
        let options = with_params(json_api(), search_params);
        self.api.call_json(&SEARCH_RELATIONSHIPS, &[container_id], options).await
    }

    /// Every relationship matching `search_params`, following
    /// `links.next.href`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn search_all_relationships(
        &self,
        container_id: &str,
        search_params: &[(&str, &str)],
    ) -> Result<Vec<Value>> {
        let options = with_params(json_api(), search_params);
        let path = SEARCH_RELATIONSHIPS.render(&[container_id])?;
        self.api.get_all_json_api(&path, SEARCH_RELATIONSHIPS.scopes, options).await
    }
}

fn with_params(options: RequestOptions, params: &[(&str, &str)]) -> RequestOptions {
    params.iter().fold(options, |options, (key, value)| options.param(*key, *value))
}
