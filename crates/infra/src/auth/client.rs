//! Client for the authentication service
//!
//! This client is itself unauthenticated: app credentials travel in the form
//! body, and the user profile call takes an explicit bearer token.

use forge_domain::constants::{
    GRANT_AUTHORIZATION_CODE, GRANT_CLIENT_CREDENTIALS, GRANT_REFRESH_TOKEN,
};
use forge_domain::{scope_param, ForgeConfig, Result, Scope, TokenResponse};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::InfraError;
use crate::http::{read_json, HttpClient, RequestOptions, Transport};

/// Authentication service client
#[derive(Clone)]
pub struct AuthenticationClient {
    transport: Transport,
}

impl AuthenticationClient {
    /// Client for the authentication service at `base_url`
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_http(HttpClient::new()?, base_url))
    }

    #[must_use]
    pub fn with_http(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { transport: Transport::new(http, base_url) }
    }

    /// Client using the host, timeout and user agent from `config`
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        Ok(Self::with_http(HttpClient::from_config(config)?, config.authentication_url()))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Two-legged token for `scopes` (`client_credentials` grant)
    ///
    /// # Errors
    /// `ForgeError::HttpStatus` when the service rejects the credentials or scopes.
    #[instrument(skip(self, client_secret, scopes), fields(scopes = %scope_param(scopes)))]
    pub async fn authenticate(
        &self,
        client_id: &str,
        client_secret: &str,
        scopes: &[Scope],
    ) -> Result<TokenResponse> {
        let form = vec![
            ("client_id".to_string(), client_id.to_string()),
            ("client_secret".to_string(), client_secret.to_string()),
            ("grant_type".to_string(), GRANT_CLIENT_CREDENTIALS.to_string()),
            ("scope".to_string(), scope_param(scopes)),
        ];
        self.post_form("/authenticate", form).await
    }

    /// Exchange an authorization code for a three-legged token
    ///
    /// `redirect_uri` must match the one used to build the authorization URL.
    ///
    /// # Errors
    /// `ForgeError::HttpStatus` for an expired or already used code.
    #[instrument(skip(self, client_secret, code))]
    pub async fn get_token(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse> {
        let form = vec![
            ("client_id".to_string(), client_id.to_string()),
            ("client_secret".to_string(), client_secret.to_string()),
            ("grant_type".to_string(), GRANT_AUTHORIZATION_CODE.to_string()),
            ("code".to_string(), code.to_string()),
            ("redirect_uri".to_string(), redirect_uri.to_string()),
        ];
        self.post_form("/gettoken", form).await
    }

    /// New access token from a refresh token issued by [`Self::get_token`]
    ///
    /// # Errors
    /// `ForgeError::HttpStatus` when the refresh token is revoked or expired.
    #[instrument(
        skip(self, client_secret, refresh_token, scopes),
        fields(scopes = %scope_param(scopes))
    )]
    pub async fn refresh_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
        scopes: &[Scope],
    ) -> Result<TokenResponse> {
        let form = vec![
            ("client_id".to_string(), client_id.to_string()),
            ("client_secret".to_string(), client_secret.to_string()),
            ("grant_type".to_string(), GRANT_REFRESH_TOKEN.to_string()),
            ("refresh_token".to_string(), refresh_token.to_string()),
            ("scope".to_string(), scope_param(scopes)),
        ];
        self.post_form("/refreshtoken", form).await
    }

    /// Profile of the end user who authorized a three-legged token
    ///
    /// # Errors
    /// `ForgeError::InvalidInput` if `access_token` is not a valid header value.
    #[instrument(skip(self, access_token))]
    pub async fn get_user_profile(&self, access_token: &str) -> Result<Value> {
        let value = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(InfraError::from)?;
        let options = RequestOptions::new().header(AUTHORIZATION, value);
        let response = self.transport.request(Method::GET, "/users/@me", options).await?;
        read_json(response).await
    }

    async fn post_form(&self, path: &str, form: Vec<(String, String)>) -> Result<TokenResponse> {
        debug!(path, "requesting token");
        let response =
            self.transport.request(Method::POST, path, RequestOptions::new().form(form)).await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use forge_domain::ForgeError;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn token_body() -> Value {
        json!({"access_token": "abc", "token_type": "Bearer", "expires_in": 3599})
    }

    #[tokio::test]
    async fn authenticate_posts_client_credentials_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .and(body_string_contains("client_id=id"))
            .and(body_string_contains("client_secret=secret"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("scope=viewables%3Aread+data%3Aread"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthenticationClient::new(server.uri()).unwrap();
        let token = client
            .authenticate("id", "secret", &[Scope::ViewablesRead, Scope::DataRead])
            .await
            .unwrap();

        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 3599);
    }

    #[tokio::test]
    async fn get_token_exchanges_authorization_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gettoken"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=xyz"))
            .and(body_string_contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "user-token",
                "token_type": "Bearer",
                "expires_in": 3599,
                "refresh_token": "refresh-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthenticationClient::new(server.uri()).unwrap();
        let token = client
            .get_token("id", "secret", "xyz", "http://localhost:3000/callback")
            .await
            .unwrap();

        assert_eq!(token.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn refresh_token_sends_refresh_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refreshtoken"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthenticationClient::new(server.uri()).unwrap();
        client.refresh_token("id", "secret", "refresh-1", &[Scope::DataRead]).await.unwrap();
    }

    #[tokio::test]
    async fn get_user_profile_uses_given_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/@me"))
            .and(header("authorization", "Bearer user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"userName": "jdoe"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthenticationClient::new(server.uri()).unwrap();
        let profile = client.get_user_profile("user-token").await.unwrap();
        assert_eq!(profile["userName"], "jdoe");
    }

    #[tokio::test]
    async fn rejected_exchange_surfaces_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid client"))
            .mount(&server)
            .await;

        let client = AuthenticationClient::new(server.uri()).unwrap();
        let err = client.authenticate("id", "wrong", &[Scope::DataRead]).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some("invalid client"));
        assert!(matches!(err, ForgeError::HttpStatus { .. }));
    }
}
