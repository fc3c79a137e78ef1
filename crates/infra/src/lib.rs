//! # Forge Infrastructure
//!
//! HTTP-facing implementations built on the `forge-domain` types.
//!
//! This crate contains:
//! - The reqwest transport wrapper and error mapping
//! - Token providers (static, cached client credentials, custom)
//! - The authenticated dispatcher and its pagination engines
//! - Endpoint descriptors and typed clients for each Forge service
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Depends on `forge-domain` only
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod auth;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod http;
pub mod services;

// Re-export commonly used items
pub use api::ApiClient;
pub use auth::{
    authorization_url, AuthenticationClient, AuthorizationRequest, Clock, OAuthTokenProvider,
    StaticTokenProvider, TokenCache, TokenProvider,
};
pub use endpoints::Endpoint;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RequestBody, RequestOptions, Transport};
pub use services::{
    AccountManagementClient, DataManagementClient, DocumentManagementClient, JobRequest,
    ModelDerivativeClient, OssClient, RelationshipsClient, ReviewsClient, WebhookRequest,
    WebhooksClient,
};
