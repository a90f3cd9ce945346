//! Completion context resolver
//!
//! Turns a cursor position into suggestions. The pipeline is:
//!
//! 1. **Classification**: decide the intent from the tree, then the text
//! 2. **Materialisation**: fetch labels or values when the intent needs them,
//!    otherwise take rows from the static table
//!
//! At most one fetch is issued per call. Fetch failures are absorbed by the
//! [`LabelProvider`] and surface as an empty suggestion list.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use logql_completion::{CompletionRequest, CompletionResolver, StaticLabelSource};
//!
//! let source = StaticLabelSource::new().with_label("job", ["api"]);
//! let resolver = CompletionResolver::new(Arc::new(source));
//!
//! let context = resolver.classify(&CompletionRequest::new("{job=", 5)).unwrap();
//! assert_eq!(context.anchor, 5);
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::context;
use crate::providers;
use crate::source::LabelProvider;
use crate::types::{
    CompletionIntent, CompletionList, CompletionRequest, QuoteStyle, ResolvedContext, Suggestion,
};

/// Resolves completion requests against a label provider and the static table
#[derive(Clone)]
pub struct CompletionResolver {
    provider: Arc<dyn LabelProvider>,
}

impl CompletionResolver {
    /// Create a resolver reading labels from `provider`
    pub fn new(provider: Arc<dyn LabelProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn LabelProvider> {
        &self.provider
    }

    /// Classify a request without fetching anything
    ///
    /// # Arguments
    ///
    /// * `request` - Document text, cursor, optional tree and trigger flag
    ///
    /// # Returns
    ///
    /// The intent, the replacement anchor and the rule that matched, or
    /// `None` when nothing applies at the cursor.
    pub fn classify(&self, request: &CompletionRequest<'_>) -> Option<ResolvedContext> {
        context::classify(request)
    }

    /// Resolve a request into suggestions
    ///
    /// # Arguments
    ///
    /// * `request` - Document text, cursor, optional tree and trigger flag
    ///
    /// # Returns
    ///
    /// `None` when nothing applies. Label branches always return a list,
    /// possibly empty when the provider has no data or failed.
    pub async fn resolve(&self, request: &CompletionRequest<'_>) -> Option<CompletionList> {
        let context = self.classify(request)?;
        debug!(branch = ?context.branch, anchor = context.anchor, "Resolved completion context");

        let suggestions = self.materialise(&context.intent).await;
        Some(CompletionList {
            anchor: context.anchor,
            suggestions,
        })
    }

    async fn materialise(&self, intent: &CompletionIntent) -> Vec<Suggestion> {
        match intent {
            CompletionIntent::StaticKeyword => providers::static_suggestions(),
            CompletionIntent::Contextual(filter) => providers::filtered_suggestions(*filter),
            CompletionIntent::LabelName => self
                .provider
                .fetch_labels()
                .await
                .iter()
                .map(|label| providers::label_suggestion(label))
                .collect(),
            CompletionIntent::LabelValue { label, quote } => {
                let values = self.provider.fetch_label_values(label).await;
                values
                    .iter()
                    .map(|value| match quote {
                        QuoteStyle::Single => providers::quoted_value_suggestion(label, value),
                        QuoteStyle::Double => providers::bare_value_suggestion(label, value),
                    })
                    .collect()
            }
        }
    }
}

impl std::fmt::Debug for CompletionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionResolver")
            .field("provider", &self.provider.source_id())
            .finish()
    }
}
