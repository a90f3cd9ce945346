//! Editor session: one document's completion and lint state
//!
//! The session owns the label cache, so two sessions never share cached
//! labels. Completion results carry a [`RequestToken`]; a host that issues
//! requests on every keystroke drops results whose token is no longer
//! current, since in-flight fetches are never cancelled.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use logql_cache::{CacheStats, LabelCache, TtlPolicy};
use logql_completion::{
    CompletionList, CompletionRequest, CompletionResolver, LabelProvider, LokiLabelSource,
    NoLabelSource,
};
use logql_http::{shared_client, HttpClientTrait};
use logql_lint::{Diagnostic, LogqlLinter};
use logql_syntax::SyntaxTree;
use tracing::{debug, info};

use crate::{error::Result, types::EditorConfig};

/// Generation marker of one completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Result of [`EditorSession::complete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub token: RequestToken,
    pub result: Option<CompletionList>,
}

/// Completion and lint entry point for one editor integration
pub struct EditorSession {
    config: EditorConfig,
    cache: Arc<LabelCache>,
    resolver: CompletionResolver,
    linter: LogqlLinter,
    generation: AtomicU64,
}

impl EditorSession {
    /// Create a session talking to the configured Loki source over HTTP
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let client = shared_client(config.http.clone())?;
        Ok(Self::with_client(config, client))
    }

    /// Create a session using `client` for Loki requests
    pub fn with_client(config: EditorConfig, client: Arc<dyn HttpClientTrait>) -> Self {
        let cache = Arc::new(LabelCache::new(TtlPolicy::new(config.cache_duration_ms)));
        let provider: Arc<dyn LabelProvider> = match &config.source {
            Some(source) => Arc::new(
                LokiLabelSource::new(source.clone(), client, cache.clone())
                    .with_options(config.fetch_options.clone()),
            ),
            None => Arc::new(NoLabelSource),
        };
        Self::assemble(config, cache, provider)
    }

    /// Create a session with a custom label provider
    ///
    /// `provider` is used as is and does not read through the session cache.
    pub fn with_provider(config: EditorConfig, provider: Arc<dyn LabelProvider>) -> Self {
        let cache = Arc::new(LabelCache::new(TtlPolicy::new(config.cache_duration_ms)));
        Self::assemble(config, cache, provider)
    }

    fn assemble(
        config: EditorConfig,
        cache: Arc<LabelCache>,
        provider: Arc<dyn LabelProvider>,
    ) -> Self {
        info!(
            source = %provider.source_id(),
            completion = config.enable_completion,
            linter = config.linter_enabled,
            "Editor session created"
        );
        let linter = LogqlLinter::with_options(config.lint);
        Self {
            resolver: CompletionResolver::new(provider),
            linter,
            cache,
            config,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<LabelCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &CompletionResolver {
        &self.resolver
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Start a new request generation, superseding all earlier tokens
    pub fn begin_request(&self) -> RequestToken {
        RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` belongs to the newest request
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Complete at `cursor`
    ///
    /// Returns no result when completion is disabled or nothing applies.
    pub async fn complete(
        &self,
        text: &str,
        cursor: usize,
        tree: Option<&dyn SyntaxTree>,
        explicit: bool,
    ) -> Completion {
        let token = self.begin_request();
        if !self.config.enable_completion {
            return Completion {
                token,
                result: None,
            };
        }

        let mut request = CompletionRequest::new(text, cursor).explicit(explicit);
        if let Some(tree) = tree {
            request = request.with_tree(tree);
        }

        let result = self.resolver.resolve(&request).await;
        debug!(
            generation = token.0,
            suggestions = result.as_ref().map(|list| list.suggestions.len()),
            "Completion finished"
        );
        Completion { token, result }
    }

    /// Lint a document; empty when the linter is disabled
    pub fn lint(&self, text: &str, tree: Option<&dyn SyntaxTree>) -> Vec<Diagnostic> {
        if !self.config.linter_enabled {
            return Vec::new();
        }
        self.linter.lint(text, tree)
    }

    /// Drop every cached label and value
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Drop cached label names for `source`, or for all sources
    pub fn clear_label_cache(&self, source: Option<&str>) {
        self.cache.clear_labels(source.map(normalize_source));
    }

    /// Drop cached values for one label of `source`, all of `source`, or everything
    ///
    /// An unknown source clears all values.
    pub fn clear_value_cache(&self, source: Option<&str>, label: Option<&str>) {
        self.cache.clear_values(source.map(normalize_source), label);
    }
}

fn normalize_source(source: &str) -> &str {
    source.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use logql_completion::StaticLabelSource;

    fn session(config: EditorConfig) -> EditorSession {
        let provider = StaticLabelSource::new().with_label("job", ["api"]);
        EditorSession::with_provider(config, Arc::new(provider))
    }

    #[test]
    fn test_tokens_supersede() {
        let session = session(EditorConfig::default());
        let first = session.begin_request();
        assert!(session.is_current(first));

        let second = session.begin_request();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_complete_returns_current_token() {
        let session = session(EditorConfig::default());
        let completion = session.complete("{", 1, None, false).await;
        assert!(session.is_current(completion.token));

        let list = completion.result.unwrap();
        assert_eq!(list.suggestions[0].insert_text(), "job=");
    }

    #[tokio::test]
    async fn test_disabled_completion() {
        let config = EditorConfig {
            enable_completion: false,
            ..EditorConfig::default()
        };
        let completion = session(config).complete("{", 1, None, true).await;
        assert_eq!(completion.result, None);
    }

    #[test]
    fn test_disabled_linter() {
        let config = EditorConfig {
            linter_enabled: false,
            ..EditorConfig::default()
        };
        assert!(session(config).lint("{", None).is_empty());
        assert_eq!(session(EditorConfig::default()).lint("{", None).len(), 1);
    }

    #[test]
    fn test_clear_calls_normalise_source() {
        let session = session(EditorConfig::default());
        let cache = session.cache();
        cache.store_labels("http://loki", vec!["job".into()]);
        cache.store_values("http://loki", "job", vec!["api".into()]);
        cache.store_values("http://loki", "level", vec!["info".into()]);

        session.clear_value_cache(Some("http://loki/"), Some("job"));
        assert!(cache.values("http://loki", "job").is_none());
        assert!(cache.values("http://loki", "level").is_some());

        session.clear_label_cache(Some("http://loki/"));
        assert!(cache.labels("http://loki").is_none());

        session.clear_value_cache(Some("http://unknown"), None);
        assert!(cache.values("http://loki", "level").is_none());
    }

    #[test]
    fn test_new_rejects_invalid_source() {
        let config = EditorConfig::default().with_source("mailto:ops@example.com");
        assert!(EditorSession::new(config).is_err());
    }
}
