//! Label data sources
//!
//! A [`LabelProvider`] answers "which labels exist" and "which values does
//! this label take". The public `fetch_*` methods never fail: any error is
//! logged and surfaces as an empty list so a flaky network never blocks
//! editing. The `try_fetch_*` methods keep the failure reason for callers
//! that need to tell "nothing there" apart from "could not ask".

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use logql_cache::LabelCache;
use logql_http::{HttpClientTrait, RequestOptions};
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::error::{Result, SourceError};

/// Where a successful fetch got its data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Remote,
}

/// Successful fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub values: Vec<String>,
    pub origin: Origin,
}

impl Fetched {
    pub fn cached(values: Vec<String>) -> Self {
        Self {
            values,
            origin: Origin::Cache,
        }
    }

    pub fn remote(values: Vec<String>) -> Self {
        Self {
            values,
            origin: Origin::Remote,
        }
    }
}

/// Provider of label names and label values
#[async_trait]
pub trait LabelProvider: Send + Sync {
    /// Short identity used in logs and cache keys
    fn source_id(&self) -> &str;

    /// Fetch label names, keeping the failure reason
    async fn try_fetch_labels(&self) -> Result<Fetched>;

    /// Fetch the values of `label`, keeping the failure reason
    async fn try_fetch_label_values(&self, label: &str) -> Result<Fetched>;

    /// Fetch label names; failures resolve to an empty list
    async fn fetch_labels(&self) -> Vec<String> {
        match self.try_fetch_labels().await {
            Ok(fetched) => fetched.values,
            Err(e) => {
                warn!(source = %self.source_id(), error = %e, "Failed to fetch labels");
                Vec::new()
            }
        }
    }

    /// Fetch the values of `label`; failures resolve to an empty list
    async fn fetch_label_values(&self, label: &str) -> Vec<String> {
        match self.try_fetch_label_values(label).await {
            Ok(fetched) => fetched.values,
            Err(e) => {
                warn!(
                    source = %self.source_id(),
                    label = %label,
                    error = %e,
                    "Failed to fetch label values"
                );
                Vec::new()
            }
        }
    }
}

/// Loki response envelope `{ "status": "success", "data": [...] }`
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    data: Vec<String>,
}

impl Envelope {
    fn decode(body: &str) -> Result<Vec<String>> {
        let envelope: Envelope = serde_json::from_str(body)?;
        match envelope.status.as_deref() {
            None | Some("success") => Ok(envelope.data),
            Some(other) => Err(SourceError::Status(other.to_string())),
        }
    }
}

/// Label source backed by a Loki HTTP API and a shared [`LabelCache`]
pub struct LokiLabelSource {
    source: String,
    client: Arc<dyn HttpClientTrait>,
    cache: Arc<LabelCache>,
    options: RequestOptions,
}

impl LokiLabelSource {
    /// Create a source for the Loki instance at `source`
    ///
    /// A trailing `/` on the base URL is dropped so `http://loki/` and
    /// `http://loki` share one cache namespace.
    pub fn new(
        source: impl Into<String>,
        client: Arc<dyn HttpClientTrait>,
        cache: Arc<LabelCache>,
    ) -> Self {
        let source = source.into();
        let source = source.trim_end_matches('/').to_string();
        Self {
            source,
            client,
            cache,
            options: RequestOptions::default(),
        }
    }

    /// Options passed verbatim to every request
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn cache(&self) -> &Arc<LabelCache> {
        &self.cache
    }

    fn labels_url(&self) -> String {
        format!("{}/loki/api/v1/labels", self.source)
    }

    fn values_url(&self, label: &str) -> String {
        format!(
            "{}/loki/api/v1/label/{}/values",
            self.source,
            urlencoding::encode(label)
        )
    }

    async fn get_list(&self, url: &str) -> Result<Vec<String>> {
        debug!(url = %url, "Fetching from Loki");
        let body = self.client.get(url, &self.options).await?;
        Envelope::decode(&body)
    }
}

#[async_trait]
impl LabelProvider for LokiLabelSource {
    fn source_id(&self) -> &str {
        &self.source
    }

    async fn try_fetch_labels(&self) -> Result<Fetched> {
        if let Some(labels) = self.cache.labels(&self.source) {
            trace!(source = %self.source, count = labels.len(), "Labels served from cache");
            return Ok(Fetched::cached(labels));
        }

        let labels = self.get_list(&self.labels_url()).await?;
        self.cache.store_labels(&self.source, labels.clone());
        Ok(Fetched::remote(labels))
    }

    async fn try_fetch_label_values(&self, label: &str) -> Result<Fetched> {
        if let Some(values) = self.cache.values(&self.source, label) {
            trace!(source = %self.source, label = %label, count = values.len(), "Values served from cache");
            return Ok(Fetched::cached(values));
        }

        let values = self.get_list(&self.values_url(label)).await?;
        self.cache.store_values(&self.source, label, values.clone());
        Ok(Fetched::remote(values))
    }
}

/// In-memory label source for offline use and tests
#[derive(Debug, Clone, Default)]
pub struct StaticLabelSource {
    labels: BTreeMap<String, Vec<String>>,
}

impl StaticLabelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label with its values
    pub fn with_label<I, S>(mut self, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels
            .insert(label.into(), values.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl LabelProvider for StaticLabelSource {
    fn source_id(&self) -> &str {
        "static"
    }

    async fn try_fetch_labels(&self) -> Result<Fetched> {
        Ok(Fetched::remote(self.labels.keys().cloned().collect()))
    }

    async fn try_fetch_label_values(&self, label: &str) -> Result<Fetched> {
        Ok(Fetched::remote(
            self.labels.get(label).cloned().unwrap_or_default(),
        ))
    }
}

/// Provider used when no source is configured: every fetch fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabelSource;

#[async_trait]
impl LabelProvider for NoLabelSource {
    fn source_id(&self) -> &str {
        "none"
    }

    async fn try_fetch_labels(&self) -> Result<Fetched> {
        Err(SourceError::NotConfigured)
    }

    async fn try_fetch_label_values(&self, _label: &str) -> Result<Fetched> {
        Err(SourceError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logql_cache::TtlPolicy;
    use logql_http::HttpError;

    struct FailingClient;

    #[async_trait]
    impl HttpClientTrait for FailingClient {
        async fn get(&self, url: &str, _options: &RequestOptions) -> logql_http::Result<String> {
            Err(HttpError::InvalidUrl(url.to_string()))
        }
    }

    struct FixedClient(&'static str);

    #[async_trait]
    impl HttpClientTrait for FixedClient {
        async fn get(&self, _url: &str, _options: &RequestOptions) -> logql_http::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn source_with(client: Arc<dyn HttpClientTrait>) -> LokiLabelSource {
        LokiLabelSource::new(
            "http://loki:3100/",
            client,
            Arc::new(LabelCache::new(TtlPolicy::default())),
        )
    }

    #[test]
    fn test_urls() {
        let source = source_with(Arc::new(FailingClient));
        assert_eq!(source.source(), "http://loki:3100");
        assert_eq!(source.labels_url(), "http://loki:3100/loki/api/v1/labels");
        assert_eq!(
            source.values_url("service name"),
            "http://loki:3100/loki/api/v1/label/service%20name/values"
        );
    }

    #[test]
    fn test_envelope_decoding() {
        assert_eq!(
            Envelope::decode(r#"{"status":"success","data":["a","b"]}"#).unwrap(),
            vec!["a", "b"]
        );
        assert_eq!(Envelope::decode(r#"{"data":[]}"#).unwrap(), Vec::<String>::new());
        assert!(matches!(
            Envelope::decode(r#"{"status":"error","data":[]}"#),
            Err(SourceError::Status(_))
        ));
        assert!(matches!(
            Envelope::decode(r#"{"values":[]}"#),
            Err(SourceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_failure_is_empty_and_leaves_cache_alone() {
        let source = source_with(Arc::new(FailingClient));

        assert!(source.fetch_labels().await.is_empty());
        assert!(source.fetch_label_values("job").await.is_empty());
        assert!(matches!(
            source.try_fetch_labels().await,
            Err(SourceError::Http(_))
        ));

        let cache = source.cache();
        assert!(cache.labels_fetched_at("http://loki:3100").is_none());
        assert!(cache.values_fetched_at("http://loki:3100", "job").is_none());
    }

    #[tokio::test]
    async fn test_success_is_cached() {
        let source = source_with(Arc::new(FixedClient(r#"{"data":["job","level"]}"#)));

        let first = source.try_fetch_labels().await.unwrap();
        assert_eq!(first.origin, Origin::Remote);
        assert_eq!(first.values, vec!["job", "level"]);

        let second = source.try_fetch_labels().await.unwrap();
        assert_eq!(second.origin, Origin::Cache);
        assert_eq!(second.values, first.values);
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_cached() {
        let source = source_with(Arc::new(FixedClient("<html>")));

        assert!(source.fetch_label_values("job").await.is_empty());
        assert!(source
            .cache()
            .values_fetched_at("http://loki:3100", "job")
            .is_none());
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticLabelSource::new()
            .with_label("job", ["api", "web"])
            .with_label("level", ["info"]);

        assert_eq!(source.fetch_labels().await, vec!["job", "level"]);
        assert_eq!(source.fetch_label_values("job").await, vec!["api", "web"]);
        assert!(source.fetch_label_values("missing").await.is_empty());
    }

    #[tokio::test]
    async fn test_no_source_fails_soft() {
        assert!(NoLabelSource.fetch_labels().await.is_empty());
        assert!(matches!(
            NoLabelSource.try_fetch_label_values("job").await,
            Err(SourceError::NotConfigured)
        ));
    }
}
