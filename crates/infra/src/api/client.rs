//! Authenticated request dispatcher

use std::fmt;
use std::sync::Arc;

use forge_domain::{scope_key, Result, Scope};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::auth::TokenProvider;
use crate::endpoints::Endpoint;
use crate::errors::InfraError;
use crate::http::{read_bytes, read_json, HttpClient, RequestOptions, Transport};

/// Service client that injects `Authorization: Bearer <token>` per call
///
/// Each call names the scopes it needs, so calls on the same client may
/// resolve different tokens. A caller-supplied `Authorization` header is
/// forwarded untouched and the provider is not consulted.
#[derive(Clone)]
pub struct ApiClient {
    transport: Transport,
    auth: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Client for `base_url` with a default [`HttpClient`]
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, auth: Arc<dyn TokenProvider>) -> Result<Self> {
        Ok(Self::with_http(HttpClient::new()?, base_url, auth))
    }

    /// Client sharing an existing [`HttpClient`]
    #[must_use]
    pub fn with_http(
        http: HttpClient,
        base_url: impl Into<String>,
        auth: Arc<dyn TokenProvider>,
    ) -> Self {
        Self { transport: Transport::new(http, base_url), auth }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Absolute URL for `path`, resolved like every request
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        self.transport.resolve(path)
    }

    /// Send one authenticated request
    ///
    /// # Errors
    ///
    /// Token provider failures are returned before anything is sent; after
    /// that, the errors of [`Transport::request`].
    #[instrument(
        skip_all,
        fields(method = %method, path = %path, scopes = %scope_key(scopes))
    )]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Response> {
        let options = self.authorize(scopes, options).await?;
        self.transport.request(method, path, options).await
    }

    /// `GET` through [`Self::request`]
    ///
    /// # Errors
    /// Same as [`Self::request`].
    pub async fn get(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Response> {
        self.request(Method::GET, path, scopes, options).await
    }

    /// `POST` through [`Self::request`]
    ///
    /// # Errors
    /// Same as [`Self::request`].
    pub async fn post(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Response> {
        self.request(Method::POST, path, scopes, options).await
    }

    /// `PUT` through [`Self::request`]
    ///
    /// # Errors
    /// Same as [`Self::request`].
    pub async fn put(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Response> {
        self.request(Method::PUT, path, scopes, options).await
    }

    /// `DELETE` through [`Self::request`]
    ///
    /// # Errors
    /// Same as [`Self::request`].
    pub async fn delete(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Response> {
        self.request(Method::DELETE, path, scopes, options).await
    }

    /// `HEAD` through [`Self::request`]
    ///
    /// # Errors
    /// Same as [`Self::request`].
    pub async fn head(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Response> {
        self.request(Method::HEAD, path, scopes, options).await
    }

    /// GET and decode the JSON body
    ///
    /// # Errors
    /// Errors of [`Self::get`]; an undecodable body is `ForgeError::MalformedResponse`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<T> {
        let response = self.get(path, scopes, options).await?;
        read_json(response).await
    }

    /// GET a binary body
    ///
    /// # Errors
    /// Errors of [`Self::get`], or `ForgeError::Transport` if the body is cut short.
    pub async fn get_bytes(
        &self,
        path: &str,
        scopes: &[Scope],
        options: RequestOptions,
    ) -> Result<Vec<u8>> {
        let response = self.get(path, scopes, options).await?;
        read_bytes(response).await
    }

    /// Invoke a described endpoint, filling its path template with `args`
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::InvalidInput` if `args` does not match the
    /// template's placeholders.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        options: RequestOptions,
    ) -> Result<Response> {
        let path = endpoint.render(args)?;
        self.request(endpoint.method.clone(), &path, endpoint.scopes, options).await
    }

    /// Like [`Self::call`], decoding the JSON body
    ///
    /// # Errors
    /// Errors of [`Self::call`]; an undecodable body is `ForgeError::MalformedResponse`.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        options: RequestOptions,
    ) -> Result<T> {
        let response = self.call(endpoint, args, options).await?;
        read_json(response).await
    }

    async fn authorize(&self, scopes: &[Scope], options: RequestOptions) -> Result<RequestOptions> {
        if options.has_authorization() {
            debug!("using caller-supplied Authorization header");
            return Ok(options);
        }

        let token = self.auth.get_token(scopes).await?;
        let mut value = HeaderValue::from_str(&token.bearer_header()).map_err(InfraError::from)?;
        value.set_sensitive(true);
        Ok(options.header(AUTHORIZATION, value))
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url()).finish_non_exhaustive()
    }
}
