//! Authenticated request dispatch and pagination
//!
//! [`ApiClient`] binds a service base URL to a [`TokenProvider`] and attaches
//! a bearer token for the scopes each call declares. The pagination engines
//! are additional methods on the same client.
//!
//! [`TokenProvider`]: crate::auth::TokenProvider

pub mod client;
pub mod pagination;

pub use client::ApiClient;
