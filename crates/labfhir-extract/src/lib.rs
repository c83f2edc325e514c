//! Field recognition for lab report text.
//!
//! - **patterns**: the Pattern Library (labels, LOINC codes, default units)
//! - **rules**: strict and permissive rule sets compiled from the library
//! - **engine**: applies a rule set to text and collects raw fields
//! - **structured**: imports field documents from a document-parsing service
//! - **completion**: unwraps and parses language-model completions

pub mod completion;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod rules;
pub mod structured;

pub use completion::{parse_completion, strip_code_fences};
pub use engine::{FieldExtractor, extract_fields};
pub use error::{Result, UpstreamError};
pub use patterns::{PATTERN_LIBRARY, PatternEntry, RATIO_UNIT, entries, entry};
pub use rules::{CompiledRules, MeasurementRule, rules_for};
pub use structured::{fields_from_str, fields_from_value};
