//! Authentication: token providers, the token cache and the
//! authentication service client

pub mod authorize;
pub mod cache;
pub mod client;
pub mod provider;

pub use authorize::{authorization_url, AuthorizationRequest};
pub use cache::TokenCache;
pub use client::AuthenticationClient;
pub use provider::{Clock, OAuthTokenProvider, StaticTokenProvider, TokenProvider};
