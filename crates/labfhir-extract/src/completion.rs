//! Language-model completion import.
//!
//! A completion is expected to hold a bundle as JSON, often wrapped in a
//! Markdown code fence. Anything that does not parse becomes an
//! [`UpstreamError::InvalidCompletion`] carrying the raw text.

use serde_json::Value;

use crate::error::{Result, UpstreamError};

/// Removes a surrounding ```` ```json ```` / ```` ``` ```` fence and whitespace.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parses the completion body as JSON.
pub fn parse_completion(text: &str) -> Result<Value> {
    let body = strip_code_fences(text);
    serde_json::from_str(body).map_err(|source| UpstreamError::InvalidCompletion {
        raw_output: body.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_is_unwrapped() {
        let value = parse_completion("```json\n{\"resourceType\": \"Bundle\"}\n```\n").unwrap();
        assert_eq!(value["resourceType"], "Bundle");
    }

    #[test]
    fn bare_fence_is_unwrapped() {
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn invalid_json_keeps_raw_output() {
        let err = parse_completion("```json\nnot json\n```").unwrap_err();
        let doc = err.to_error_document();
        assert_eq!(doc.error, "Invalid JSON from LLM");
        assert_eq!(doc.raw_output.as_deref(), Some("not json"));
    }
}
