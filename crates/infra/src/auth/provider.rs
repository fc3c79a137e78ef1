//! Token providers
//!
//! Clients hold an `Arc<dyn TokenProvider>` and ask it for a token before
//! every call. Two implementations ship here; any other type implementing
//! [`TokenProvider`] can be plugged in the same way.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forge_domain::{scope_key, AccessToken, ForgeConfig, Result, Scope};
use tracing::{debug, info};

use super::cache::TokenCache;
use super::client::AuthenticationClient;

/// Source of bearer tokens for a set of scopes
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Token valid for (at least) `scopes`
    ///
    /// # Errors
    /// Implementations return `ForgeError::HttpStatus` or `ForgeError::Transport`
    /// when the token cannot be obtained.
    async fn get_token(&self, scopes: &[Scope]) -> Result<AccessToken>;
}

/// Provider that always hands out the same token
///
/// The token is never checked against the requested scopes, so it must
/// already carry every scope the caller will need.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { token: AccessToken::non_expiring(access_token) }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _scopes: &[Scope]) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}

/// Time source used for expiry checks
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Two-legged provider that requests and caches one token per scope set
///
/// Two concurrent misses on the same scope set may both reach the
/// authentication service; the later response simply overwrites the earlier
/// cache entry and both tokens remain valid.
pub struct OAuthTokenProvider {
    client_id: String,
    client_secret: String,
    auth_client: AuthenticationClient,
    cache: TokenCache,
    clock: Clock,
}

impl OAuthTokenProvider {
    /// Provider talking to the production authentication service
    ///
    /// # Errors
    /// Returns `ForgeError::InvalidInput` if the HTTP client cannot be built.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let auth_client = AuthenticationClient::from_config(&ForgeConfig::default())?;
        Ok(Self::with_client(auth_client, client_id, client_secret))
    }

    /// Provider using the credentials, host and timeout from `config`
    ///
    /// # Errors
    /// Returns `ForgeError::Config` when the credentials are not configured.
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let (client_id, client_secret) = config.credentials()?;
        let auth_client = AuthenticationClient::from_config(config)?;
        Ok(Self::with_client(auth_client, client_id, client_secret))
    }

    #[must_use]
    pub fn with_client(
        auth_client: AuthenticationClient,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_client,
            cache: TokenCache::new(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock used for expiry checks
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Number of scope sets with a cached token
    #[must_use]
    pub fn cached_scope_sets(&self) -> usize {
        self.cache.len()
    }
}

impl fmt::Debug for OAuthTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokenProvider")
            .field("client_id", &self.client_id)
            .field("auth_url", &self.auth_client.base_url())
            .field("cached_scope_sets", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn get_token(&self, scopes: &[Scope]) -> Result<AccessToken> {
        let key = scope_key(scopes);
        let now = (self.clock)();

        if let Some(token) = self.cache.get_valid(&key, now) {
            debug!(scope_key = %key, "token cache hit");
            return Ok(token);
        }

        info!(scope_key = %key, "requesting new access token");
        let response =
            self.auth_client.authenticate(&self.client_id, &self.client_secret, scopes).await?;
        let token = AccessToken::from_response(response, now)?;
        self.cache.insert(key, token.clone());
        Ok(token)
    }
}
