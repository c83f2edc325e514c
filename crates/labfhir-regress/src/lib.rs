//! Regression harness for lab report converters.
//!
//! Runs a converter over every `*.txt` input under a test root and compares
//! each `<base>-<suffix>.json` output with its `<base>-<suffix>-baseline.json`,
//! either byte-for-byte or on a list of dotted field paths. Baseline mode
//! refreshes the baselines instead.

pub mod compare;
pub mod config;
pub mod discovery;
pub mod error;
pub mod field_path;
pub mod hash;
pub mod report;
pub mod runner;

pub use compare::{Comparison, FieldDifference, diff_fields};
pub use config::{HarnessConfig, HarnessMode};
pub use discovery::{CaseFilter, discover_inputs};
pub use error::{HarnessError, Result};
pub use field_path::{FieldPath, Resolved, parse_field_list};
pub use hash::{sha256_hex, short_digest};
pub use report::{CaseFailure, CaseOutcome, CaseResult, HarnessReport};
pub use runner::{case_paths, run};
