//! Cross-crate integration tests for the LogQL workspace
//!
//! The tests under `tests/` drive an [`EditorSession`](logql_editor::EditorSession)
//! end to end against a mock Loki.

pub use logql_cache as cache;
pub use logql_completion as completion;
pub use logql_editor as editor;
pub use logql_http as http;
pub use logql_lint as lint;
pub use logql_syntax as syntax;
