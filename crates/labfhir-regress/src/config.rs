//! Harness configuration and the checks made before any case runs.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};
use crate::field_path::{FieldPath, parse_field_list};

/// Whether the run refreshes baselines or checks against them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarnessMode {
    #[default]
    Verify,
    Baseline,
}

/// One regression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Converter executable; invoked as `<program> [program_args...] <input>`.
    pub program: PathBuf,
    pub program_args: Vec<String>,
    /// Directory searched recursively for `*.txt` inputs.
    pub test_root: PathBuf,
    /// Relative path, or a wildcard pattern when it contains `*`, `?`, or `[`.
    pub pattern: Option<String>,
    /// One dotted field path per line; whole-file comparison when absent.
    pub field_file: Option<PathBuf>,
    pub mode: HarnessMode,
    /// Output name suffix; defaults to the program's file stem.
    pub output_suffix: Option<String>,
}

impl HarnessConfig {
    pub fn new(program: impl Into<PathBuf>, test_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            program_args: Vec::new(),
            test_root: test_root.into(),
            pattern: None,
            field_file: None,
            mode: HarnessMode::Verify,
            output_suffix: None,
        }
    }

    pub fn with_program_args(mut self, args: Vec<String>) -> Self {
        self.program_args = args;
        self
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_field_file(mut self, path: Option<PathBuf>) -> Self {
        self.field_file = path;
        self
    }

    pub fn with_mode(mut self, mode: HarnessMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_output_suffix(mut self, suffix: Option<String>) -> Self {
        self.output_suffix = suffix.filter(|s| !s.trim().is_empty());
        self
    }

    /// Suffix used to name outputs and baselines.
    pub fn suffix(&self) -> String {
        if let Some(suffix) = &self.output_suffix {
            return suffix.clone();
        }
        self.program
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Checks the program, test root, and field file, and loads the field
    /// paths. `None` means whole-file comparison.
    pub fn validate(&self) -> Result<Option<Vec<FieldPath>>> {
        if !self.program.is_file() {
            return Err(HarnessError::ProgramNotFound {
                path: self.program.clone(),
            });
        }
        if !self.test_root.is_dir() {
            return Err(HarnessError::TestRootNotFound {
                path: self.test_root.clone(),
            });
        }
        match &self.field_file {
            Some(path) => load_field_file(path),
            None => Ok(None),
        }
    }
}

fn load_field_file(path: &Path) -> Result<Option<Vec<FieldPath>>> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => HarnessError::FieldFileNotFound {
            path: path.to_path_buf(),
        },
        _ => HarnessError::FieldFileRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let fields = parse_field_list(&text);
    // An empty list falls back to whole-file comparison.
    Ok((!fields.is_empty()).then_some(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_defaults_to_program_stem() {
        let config = HarnessConfig::new("bin/fhir_regex.py", "records");
        assert_eq!(config.suffix(), "fhir_regex");
        let config = config.with_output_suffix(Some("labfhir".to_string()));
        assert_eq!(config.suffix(), "labfhir");
    }

    #[test]
    fn test_blank_pattern_is_none() {
        let config = HarnessConfig::new("p", "r").with_pattern(Some("  ".to_string()));
        assert_eq!(config.pattern, None);
    }
}
