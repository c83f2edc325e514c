//! Library components of the `labfhir` command-line tool.
//!
//! - **config**: optional TOML configuration file
//! - **logging**: tracing subscriber setup and value redaction

pub mod config;
pub mod logging;
