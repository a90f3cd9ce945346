//! Per-request transport options

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

/// Basic authentication credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Transport options applied to every request, verbatim
///
/// These are supplied by the embedder and never interpreted by the
/// completion layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Extra request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Bearer token sent as `Authorization: Bearer ...`
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Basic auth credentials
    #[serde(default)]
    pub basic_auth: Option<BasicAuth>,

    /// Loki tenant, sent as `X-Scope-OrgID`
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Request timeout overriding the client default, in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl RequestOptions {
    /// Header carrying the Loki tenant
    pub const TENANT_HEADER: &'static str = "X-Scope-OrgID";

    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set bearer token
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set basic auth credentials
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password,
        });
        self
    }

    /// Set Loki tenant
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
