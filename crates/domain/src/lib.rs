//! # Forge Domain
//!
//! Data types shared by every Forge service client.
//!
//! This crate contains:
//! - The error type and Result alias used across the workspace
//! - OAuth scopes and access token value objects
//! - Wire shapes of the paginated responses
//! - Configuration structures and service constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O; everything here is plain data

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::urn::urnify;
