//! logql command-line interface
//!
//! Lints and completes LogQL queries from files or stdin, and lists label
//! names and values from a Loki instance.

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
pub use router::{Cli, CommandRouter, Commands};
