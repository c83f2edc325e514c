use labfhir_model::ErrorDocument;
use thiserror::Error;

/// Failures reported by an upstream collaborator (document-parsing service or
/// language-model endpoint). These replace the bundle with an error document.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("No structured data extracted from document")]
    NoStructuredData,
    #[error("structured data is not a JSON object")]
    NotAnObject,
    #[error("invalid structured data: {0}")]
    InvalidStructuredData(#[source] serde_json::Error),
    #[error("Invalid JSON from LLM")]
    InvalidCompletion {
        raw_output: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// Converts the failure into the document written in place of a bundle.
    pub fn to_error_document(&self) -> ErrorDocument {
        match self {
            UpstreamError::InvalidCompletion { raw_output, .. } => {
                ErrorDocument::new(self.to_string()).with_raw_output(raw_output.clone())
            }
            UpstreamError::NoStructuredData
            | UpstreamError::NotAnObject
            | UpstreamError::InvalidStructuredData(_) => ErrorDocument::new(self.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, UpstreamError>;
