//! HTTP plumbing shared by every service client

pub mod client;
pub mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::{read_bytes, read_json, RequestBody, RequestOptions, Transport};
