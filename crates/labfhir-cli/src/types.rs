use std::path::PathBuf;

use labfhir_model::{ValidationIssue, error_count, warning_count};

/// What a converted document turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentKind {
    Bundle { observations: usize },
    /// A completion emitted as received.
    Completion,
    /// An error document written in place of a bundle.
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub input: PathBuf,
    /// `None` when the document went to stdout.
    pub output: Option<PathBuf>,
    pub kind: DocumentKind,
    pub warnings: Vec<ValidationIssue>,
}

impl ConversionSummary {
    pub fn is_error_document(&self) -> bool {
        matches!(self.kind, DocumentKind::Error(_))
    }

    pub fn error_count(&self) -> usize {
        error_count(&self.warnings)
    }

    pub fn warning_count(&self) -> usize {
        warning_count(&self.warnings)
    }
}
