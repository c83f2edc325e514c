//! Lab report to FHIR bundle pipeline.
//!
//! # Overview
//!
//! - **pipeline_context**: options and validator shared across documents
//! - **pipeline**: text, structured-field, and completion entry points
//! - **assemble**: builds Patient, DiagnosticReport, and Observations
//! - **ids**: per-document Observation identifiers
//!
//! # Example
//!
//! ```ignore
//! use labfhir_core::{PipelineContext, write_json, output_path};
//!
//! let context = PipelineContext::new();
//! let assembly = context.process_text(&text);
//! write_json(&output_path(input, "labfhir"), &assembly.bundle)?;
//! ```

pub mod assemble;
pub mod error;
pub mod ids;
pub mod pipeline;
pub mod pipeline_context;

pub use assemble::{Assembly, BundleAssembler};
pub use error::{PipelineError, Result};
pub use ids::IdSequencer;
pub use pipeline::{CompletionOutput, output_path, to_json_string, write_json};
pub use pipeline_context::{DerivationPolicy, PipelineContext, PipelineOptions, RuleSet};
