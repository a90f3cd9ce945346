//! LogQL completion
//!
//! Context-aware completion for LogQL queries: static keywords, operators
//! and functions, plus label names and label values fetched from Loki.
//!
//! # Architecture
//!
//! 1. **Context Analysis** ([`context`]): decide from the syntax tree, or from
//!    the text before the cursor, what kind of suggestion fits
//! 2. **Label Sources** ([`source`]): fetch labels and values through the
//!    shared TTL cache, failing soft
//! 3. **Resolution** ([`resolver`]): combine both into an anchored
//!    suggestion list
//!
//! The static vocabulary lives in [`providers`].

pub mod context;
pub mod error;
pub mod providers;
pub mod resolver;
pub mod source;
pub mod types;

pub use error::{Result, SourceError};
pub use providers::{static_suggestions, StaticEntry, STATIC_ENTRIES};
pub use resolver::CompletionResolver;
pub use source::{
    Fetched, LabelProvider, LokiLabelSource, NoLabelSource, Origin, StaticLabelSource,
};
pub use types::{
    CompletionIntent, CompletionList, CompletionRequest, KindFilter, QuoteStyle,
    ResolutionBranch, ResolvedContext, Suggestion, SuggestionKind,
};
