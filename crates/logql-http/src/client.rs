//! HTTP client implementation

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    RequestBuilder,
};
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    options::RequestOptions,
};

/// Mockable HTTP client trait
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a GET request and return the body of a 2xx response
    ///
    /// Non-2xx statuses are reported as [`HttpError::HttpStatus`].
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<String>;
}

/// Production HTTP client
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(&config.user_agent)
            .redirect(if config.max_redirects > 0 {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            });

        // Configure proxy if provided
        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        // Configure connection pooling
        if config.pool_enabled {
            builder = builder.pool_idle_timeout(config.pool_idle_timeout());
        } else {
            builder = builder.pool_max_idle_per_host(0);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Create HTTP client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn apply_options(request: RequestBuilder, options: &RequestOptions) -> Result<RequestBuilder> {
        let mut request = request.headers(header_map(options)?);

        if let Some(token) = &options.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(auth) = &options.basic_auth {
            request = request.basic_auth(&auth.username, auth.password.as_ref());
        }
        if let Some(timeout) = options.timeout() {
            request = request.timeout(timeout);
        }

        Ok(request)
    }
}

fn header_map(options: &RequestOptions) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let tenant = options
        .tenant_id
        .as_ref()
        .map(|tenant| (RequestOptions::TENANT_HEADER, tenant));

    for (name, value) in options
        .headers
        .iter()
        .map(|(name, value)| (name.as_str(), value))
        .chain(tenant)
    {
        let invalid = |message: String| HttpError::InvalidHeader {
            name: name.to_string(),
            message,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<String> {
        debug!("HTTP GET: {}", url);

        let url = url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let request = Self::apply_options(self.inner.get(url), options)?;
        let response = request.send().await.map_err(HttpError::RequestFailed)?;

        // Check for HTTP error status
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::HttpStatus {
                status,
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        response.text().await.map_err(HttpError::RequestFailed)
    }
}

/// Create a shared HTTP client (Arc-wrapped for cloning)
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn HttpClientTrait>> {
    Ok(Arc::new(HttpClient::new(config)?))
}
