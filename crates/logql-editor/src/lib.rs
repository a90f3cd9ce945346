//! LogQL editor integration
//!
//! Configuration loading plus [`EditorSession`], the surface a host editor
//! talks to: completion with request tokens, linting, and explicit cache
//! clearing.

pub mod error;
pub mod loader;
pub mod manager;
pub mod session;
pub mod types;

pub use error::{ConfigError, Result};
pub use loader::{ConfigFormat, ConfigLoader};
pub use manager::{ConfigManager, ENV_PREFIX};
pub use session::{Completion, EditorSession, RequestToken};
pub use types::EditorConfig;
