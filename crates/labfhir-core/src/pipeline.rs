//! Pipeline entry points.
//!
//! Text, structured fields, and language-model completions each end in a
//! serializable document: an assembled [`Bundle`](labfhir_model::Bundle), the
//! completion's own JSON, or an [`ErrorDocument`](labfhir_model::ErrorDocument)
//! when an upstream collaborator produced nothing usable.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use labfhir_extract::{UpstreamError, fields_from_str, parse_completion};
use labfhir_model::{Bundle, RawFields, ValidationIssue};
use labfhir_transform::normalize;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::assemble::Assembly;
use crate::error::{PipelineError, Result};
use crate::pipeline_context::PipelineContext;

/// Issue code for a completion that does not have the shape of a bundle.
pub const CODE_COMPLETION_SHAPE: &str = "BNDL-SHAPE";

/// A parsed completion and the validator's findings for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutput {
    /// The completion's JSON, emitted unchanged.
    pub document: Value,
    pub warnings: Vec<ValidationIssue>,
}

impl PipelineContext {
    /// Extracts, normalizes, and assembles one report's text.
    pub fn process_text(&self, text: &str) -> Assembly {
        self.process_text_on(text, today())
    }

    /// [`Self::process_text`] with an explicit current date.
    pub fn process_text_on(&self, text: &str, today: NaiveDate) -> Assembly {
        let raw = self.extractor().extract(text);
        self.process_fields_on(&raw, today)
    }

    /// Normalizes and assembles already-recognized fields.
    pub fn process_fields(&self, raw: &RawFields) -> Assembly {
        self.process_fields_on(raw, today())
    }

    /// [`Self::process_fields`] with an explicit current date.
    pub fn process_fields_on(&self, raw: &RawFields, today: NaiveDate) -> Assembly {
        let normalized = normalize(raw, &self.options, today);
        debug!(
            measurements = normalized.measurements.len(),
            "normalized document"
        );
        self.assembler().assemble(&normalized)
    }

    /// Assembles a bundle from a structured field document.
    pub fn process_structured(&self, json: &str) -> std::result::Result<Assembly, UpstreamError> {
        let raw = fields_from_str(json)?;
        Ok(self.process_fields(&raw))
    }

    /// Parses a language-model completion and validates it when it has the
    /// shape of a bundle. The document itself is never rewritten.
    pub fn process_completion(
        &self,
        text: &str,
    ) -> std::result::Result<CompletionOutput, UpstreamError> {
        let document = parse_completion(text)?;
        let warnings = match serde_json::from_value::<Bundle>(document.clone()) {
            Ok(bundle) => self.validator().validate(&bundle),
            Err(err) => vec![ValidationIssue::warning(
                CODE_COMPLETION_SHAPE,
                format!("completion is not a well-formed bundle: {err}"),
            )],
        };
        for issue in &warnings {
            warn!(code = %issue.code, "completion validation: {}", issue.message);
        }
        Ok(CompletionOutput { document, warnings })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `<input without extension>-<suffix>.json`, next to the input.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(format!("-{suffix}.json"));
    input.with_file_name(name)
}

/// Pretty JSON with two-space indentation and no trailing newline.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes `value` to `path` as [`to_json_string`] renders it.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = to_json_string(value)?;
    fs::write(path, json).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("cases/report1.txt"), "labfhir"),
            PathBuf::from("cases/report1-labfhir.json")
        );
        assert_eq!(
            output_path(Path::new("report.v2.txt"), "x"),
            PathBuf::from("report.v2-x.json")
        );
        assert_eq!(
            output_path(Path::new("noext"), "x"),
            PathBuf::from("noext-x.json")
        );
    }
}
