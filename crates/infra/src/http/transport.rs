//! Transport wrapper: path resolution, body encoding and status checking
//!
//! A [`Transport`] binds an [`HttpClient`] to one service base URL. Paths
//! starting with `/` are resolved against that base; anything else is taken
//! as an absolute URL, which is how pagination follows continuation links.

use forge_domain::{ForgeError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, IntoHeaderName, AUTHORIZATION};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::client::HttpClient;
use crate::errors::InfraError;

/// Request payload; at most one kind of body per request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `application/json`
    Json(serde_json::Value),
    /// Raw bytes, sent with whatever `Content-Type` the caller set
    Bytes(Vec<u8>),
}

/// Per-call query parameters, headers and body
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Add the parameter only when a value is present
    #[must_use]
    pub fn param_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a header from plain strings, rejecting invalid names or values
    ///
    /// # Errors
    /// `ForgeError::InvalidInput` for an invalid header name or value.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(InfraError::from)?;
        let value = HeaderValue::from_str(value).map_err(InfraError::from)?;
        Ok(self.header(name, value))
    }

    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    #[must_use]
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    #[must_use]
    pub fn bytes(mut self, data: Vec<u8>) -> Self {
        self.body = RequestBody::Bytes(data);
        self
    }

    /// `true` when the caller already supplied an `Authorization` header
    #[must_use]
    pub fn has_authorization(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }
}

/// HTTP client bound to one service base URL
#[derive(Clone)]
pub struct Transport {
    http: HttpClient,
    base_url: String,
}

impl Transport {
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`
    ///
    /// `/buckets` becomes `<base>/buckets`; any other input is returned
    /// unchanged.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            path.to_string()
        }
    }

    /// Send one request and fail on any status >= 400
    ///
    /// # Errors
    ///
    /// - `ForgeError::InvalidInput` if the resolved URL does not parse
    /// - `ForgeError::Transport` if no response was received
    /// - `ForgeError::HttpStatus` carrying the status and response body
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        let url = Url::parse(&self.resolve(path)).map_err(InfraError::from)?;

        let RequestOptions { params, headers, body } = options;
        let mut builder = self.http.request(method, url.clone()).headers(headers);
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Bytes(data) => builder.body(data),
        };

        let response = self.http.send(builder).await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), %url, "request rejected");
            return Err(ForgeError::HttpStatus { status: status.as_u16(), url, body });
        }

        Ok(response)
    }
}

/// Decode a JSON response body
///
/// An empty body decodes as JSON `null`, so `()` and `Option<T>` targets
/// accept `204 No Content`.
///
/// # Errors
/// `ForgeError::MalformedResponse` when the body does not decode into `T`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await.map_err(InfraError::from)?;
    if bytes.is_empty() {
        return serde_json::from_value(serde_json::Value::Null)
            .map_err(|err| ForgeError::from(InfraError::from(err)));
    }
    serde_json::from_slice(&bytes).map_err(|err| ForgeError::from(InfraError::from(err)))
}

/// Read a binary response body
///
/// # Errors
/// `ForgeError::Transport` if the body cannot be read to the end.
pub async fn read_bytes(response: Response) -> Result<Vec<u8>> {
    let bytes = response.bytes().await.map_err(InfraError::from)?;
    Ok(bytes.to_vec())
}
