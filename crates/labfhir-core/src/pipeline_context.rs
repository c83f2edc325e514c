//! Pipeline context shared by every document in a run.
//!
//! Holds the [`PipelineOptions`] and the validator capability so extraction,
//! normalization, and assembly see the same configuration.

use std::fmt;

use labfhir_extract::FieldExtractor;
pub use labfhir_model::{DerivationPolicy, PipelineOptions, RuleSet};
use labfhir_validate::{BundleValidator, StructuralValidator};

use crate::assemble::BundleAssembler;

pub struct PipelineContext {
    /// Rule set, derivation policy, and default facility.
    pub options: PipelineOptions,
    validator: Box<dyn BundleValidator>,
}

impl PipelineContext {
    /// Strict options with the structural validator.
    pub fn new() -> Self {
        Self {
            options: PipelineOptions::default(),
            validator: Box::new(StructuralValidator),
        }
    }

    /// Sets the pipeline options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the validator consulted after assembly.
    pub fn with_validator(mut self, validator: impl BundleValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn validator(&self) -> &dyn BundleValidator {
        self.validator.as_ref()
    }

    pub fn extractor(&self) -> FieldExtractor {
        FieldExtractor::new(self.options.rule_set)
    }

    pub fn assembler(&self) -> BundleAssembler<'_> {
        BundleAssembler::new(self.validator())
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineContext")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
