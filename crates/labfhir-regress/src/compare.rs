//! Output-versus-baseline comparison.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::field_path::FieldPath;
use crate::hash::sha256_hex;

/// One field whose value differs between baseline and output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDifference {
    pub path: String,
    /// `None` when the path is absent from the baseline.
    pub baseline: Option<Value>,
    /// `None` when the path is absent from the output.
    pub output: Option<Value>,
}

/// Result of comparing one output against its baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Identical,
    /// Whole-file mismatch, with both SHA-256 digests.
    ContentDiffers {
        output_sha256: String,
        baseline_sha256: String,
    },
    FieldsDiffer(Vec<FieldDifference>),
    /// Either file could not be read or parsed.
    Unreadable(String),
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Identical)
    }
}

/// Byte-for-byte comparison.
pub fn compare_files(output: &Path, baseline: &Path) -> Comparison {
    let (output_bytes, baseline_bytes) = match (fs::read(output), fs::read(baseline)) {
        (Ok(o), Ok(b)) => (o, b),
        (Err(err), _) => return Comparison::Unreadable(format!("{}: {err}", output.display())),
        (_, Err(err)) => return Comparison::Unreadable(format!("{}: {err}", baseline.display())),
    };
    if output_bytes == baseline_bytes {
        Comparison::Identical
    } else {
        Comparison::ContentDiffers {
            output_sha256: sha256_hex(&output_bytes),
            baseline_sha256: sha256_hex(&baseline_bytes),
        }
    }
}

/// Compares only the listed fields.
pub fn compare_fields(output: &Path, baseline: &Path, fields: &[FieldPath]) -> Comparison {
    let output_doc = match read_json(output) {
        Ok(doc) => doc,
        Err(message) => return Comparison::Unreadable(message),
    };
    let baseline_doc = match read_json(baseline) {
        Ok(doc) => doc,
        Err(message) => return Comparison::Unreadable(message),
    };
    let differences = diff_fields(&output_doc, &baseline_doc, fields);
    if differences.is_empty() {
        Comparison::Identical
    } else {
        Comparison::FieldsDiffer(differences)
    }
}

/// Lists the fields whose resolved values differ. Absent on both sides is a
/// match; absent on one side only is a difference.
pub fn diff_fields(output: &Value, baseline: &Value, fields: &[FieldPath]) -> Vec<FieldDifference> {
    fields
        .iter()
        .filter_map(|path| {
            let out = path.resolve(output);
            let base = path.resolve(baseline);
            (out != base).then(|| FieldDifference {
                path: path.to_string(),
                baseline: base.to_owned_value(),
                output: out.to_owned_value(),
            })
        })
        .collect()
}

fn read_json(path: &Path) -> Result<Value, String> {
    let text = fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    serde_json::from_str(&text).map_err(|err| format!("{}: invalid JSON: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_diff_fields() {
        let output = json!({"entry": [{"resource": {"gender": "male"}}]});
        let baseline = json!({"entry": [{"resource": {"gender": "female"}}]});
        let fields = vec![
            FieldPath::parse("entry.0.resource.gender"),
            FieldPath::parse("entry.9.resource.gender"),
        ];
        let diffs = diff_fields(&output, &baseline, &fields);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "entry.0.resource.gender");
        assert_eq!(diffs[0].baseline, Some(json!("female")));
        assert_eq!(diffs[0].output, Some(json!("male")));
    }

    #[test]
    fn test_absent_on_one_side() {
        let output = json!({"a": 1});
        let baseline = json!({});
        let diffs = diff_fields(&output, &baseline, &[FieldPath::parse("a")]);
        assert_eq!(diffs[0].baseline, None);
        assert_eq!(diffs[0].output, Some(json!(1)));
    }
}
