//! Per-service clients
//!
//! Thin wrappers that fill in endpoint descriptors and hand them to the
//! dispatcher or a pagination engine. Responses are returned as
//! `serde_json::Value` unless the page shape is part of the contract.

use forge_domain::constants::{CONTENT_TYPE_JSON_API, HEADER_REGION};
use forge_domain::Region;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};

use crate::http::RequestOptions;

/// Implements the constructors shared by single-base-URL service clients
///
/// # Arguments
///
/// * `$client` - Client struct with a single `api: ApiClient` field
/// * `$url` - `ForgeConfig` method returning the service base URL
macro_rules! impl_service_client {
    ($client:ident, $url:ident) => {
        impl $client {
            /// Client for the service at `base_url`
            ///
            /// # Errors
            /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
            pub fn new(
                base_url: impl Into<String>,
                auth: ::std::sync::Arc<dyn $crate::auth::TokenProvider>,
            ) -> ::forge_domain::Result<Self> {
                Ok(Self::with_api($crate::api::ApiClient::new(base_url, auth)?))
            }

            /// Client using the host, timeout and user agent from `config`
            ///
            /// # Errors
            /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
            pub fn from_config(
                config: &::forge_domain::ForgeConfig,
                auth: ::std::sync::Arc<dyn $crate::auth::TokenProvider>,
            ) -> ::forge_domain::Result<Self> {
                let http = $crate::http::HttpClient::from_config(config)?;
                Ok(Self::with_api($crate::api::ApiClient::with_http(http, config.$url(), auth)))
            }

            #[must_use]
            pub const fn with_api(api: $crate::api::ApiClient) -> Self {
                Self { api }
            }

            /// Underlying dispatcher, for endpoints without a dedicated method
            #[must_use]
            pub const fn api(&self) -> &$crate::api::ApiClient {
                &self.api
            }
        }
    };
}

pub mod account_management;
pub mod data_management;
pub mod document_management;
pub mod model_derivative;
pub mod oss;
pub mod relationships;
pub mod reviews;
pub mod webhooks;

pub use account_management::AccountManagementClient;
pub use data_management::DataManagementClient;
pub use document_management::DocumentManagementClient;
pub use model_derivative::{DerivativeInfo, JobRequest, ModelDerivativeClient};
pub use oss::OssClient;
pub use relationships::RelationshipsClient;
pub use reviews::ReviewsClient;
pub use webhooks::{WebhookRequest, WebhooksClient};

fn content_type(options: RequestOptions, value: &'static str) -> RequestOptions {
    options.header(CONTENT_TYPE, HeaderValue::from_static(value))
}

fn json_api() -> RequestOptions {
    content_type(RequestOptions::new(), CONTENT_TYPE_JSON_API)
}

fn with_region(options: RequestOptions, region: Option<Region>) -> RequestOptions {
    match region {
        Some(region) => options.header(
            HeaderName::from_static(HEADER_REGION),
            HeaderValue::from_static(region.as_str()),
        ),
        None => options,
    }
}
