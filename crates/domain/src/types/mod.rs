//! Domain types and models

pub mod page;
pub mod scope;
pub mod service;
pub mod token;

// Re-export the core types for convenience
pub use page::{CursorPage, JsonApiLinks, JsonApiPage, NextLink, Page, PaginationMeta, ResultsPage};
pub use scope::{scope_key, scope_param, Scope};
pub use service::{DataRetention, PermissionAction, Region, ResponseType, Subject};
pub use token::{AccessToken, TokenResponse};
