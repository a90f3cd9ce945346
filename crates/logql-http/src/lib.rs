//! HTTP transport for LogQL tooling
//!
//! Provides a mockable, configurable HTTP client wrapper used to query Loki.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Configurable**: Timeouts, proxy, user-agent
//! - **Per-request options**: Headers, auth and tenant passed through verbatim
//! - **No retries**: a failed request fails once, callers decide what to do

pub mod client;
pub mod config;
pub mod error;
pub mod options;

pub use client::{shared_client, HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use options::{BasicAuth, RequestOptions};

/// Re-export commonly used types
pub use reqwest::StatusCode;
