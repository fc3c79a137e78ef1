//! Document reviews client

use forge_domain::Result;
use serde_json::Value;
use tracing::instrument;

use super::content_type;
use crate::api::ApiClient;
use crate::endpoints::reviews::{GET_REVIEWS, GET_REVIEW_VERSIONS};
use crate::http::RequestOptions;

/// Reviews of a project, newest first
#[derive(Clone, Debug)]
pub struct ReviewsClient {
    api: ApiClient,
}

impl_service_client!(ReviewsClient, reviews_url);

impl ReviewsClient {
    /// Every review of a project, following `pagination.next`
    ///
    /// # Errors
    /// Aborts with the first page error.
    #[instrument(skip(self))]
    pub async fn get_reviews(&self, project_id: &str) -> Result<Vec<Value>> {
        let options = content_type(RequestOptions::new(), "application/json")
            .param("sort", "-sequenceId")
            .param("offset", 0)
            .param("limit", 20);
        let path = GET_REVIEWS.render(&[project_id])?;
        self.api.get_all_results_cursor(&path, GET_REVIEWS.scopes, options).await
    }

    /// Every document version attached to a review
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    #[instrument(skip(self))]
    pub async fn get_review(&self, project_id: &str, review_id: &str) -> Result<Vec<Value>> {
        let options = content_type(RequestOptions::new(), "application/json")
            .param("limit", 50)
            .param("offset", 0);
        let path = GET_REVIEW_VERSIONS.render(&[project_id, review_id])?;
        self.api.get_all_results_cursor(&path, GET_REVIEW_VERSIONS.scopes, options).await
    }
}
