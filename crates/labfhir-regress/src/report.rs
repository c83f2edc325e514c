//! Per-case outcomes and the run report.

use std::path::PathBuf;

use crate::compare::FieldDifference;
use crate::config::HarnessMode;

/// How a single case ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Passed,
    /// Verify mode with no baseline on disk.
    NoBaseline,
    BaselineWritten,
    Failed(CaseFailure),
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        !matches!(self, CaseOutcome::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaseOutcome::Passed => "PASS",
            CaseOutcome::NoBaseline => "PASS (no baseline)",
            CaseOutcome::BaselineWritten => "BASELINE",
            CaseOutcome::Failed(_) => "FAIL",
        }
    }
}

/// Why a case failed.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseFailure {
    /// The program could not be started.
    Spawn(String),
    /// The program exited unsuccessfully.
    ProgramFailed { status: String, stderr: String },
    /// The program succeeded but wrote no output.
    MissingOutput(PathBuf),
    ContentDiffers {
        output_sha256: String,
        baseline_sha256: String,
    },
    FieldsDiffer(Vec<FieldDifference>),
    Unreadable(String),
    /// The baseline could not be written.
    BaselineWrite(String),
    /// Output from an earlier run could not be removed.
    StaleOutput(String),
}

impl CaseFailure {
    pub fn summary(&self) -> String {
        match self {
            CaseFailure::Spawn(message) => format!("could not run program: {message}"),
            CaseFailure::ProgramFailed { status, .. } => format!("program failed ({status})"),
            CaseFailure::MissingOutput(path) => {
                format!("expected output {} not found", path.display())
            }
            CaseFailure::ContentDiffers { .. } => "differs from baseline".to_string(),
            CaseFailure::FieldsDiffer(diffs) => {
                format!("differs from baseline in {} field(s)", diffs.len())
            }
            CaseFailure::Unreadable(message) => format!("could not read JSON: {message}"),
            CaseFailure::BaselineWrite(message) => format!("could not write baseline: {message}"),
            CaseFailure::StaleOutput(message) => {
                format!("could not remove previous output: {message}")
            }
        }
    }
}

/// One input file and what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub input: PathBuf,
    /// Input path relative to the test root, `/`-separated.
    pub name: String,
    pub output: PathBuf,
    pub baseline: PathBuf,
    pub outcome: CaseOutcome,
}

/// Everything a run did.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessReport {
    pub mode: HarnessMode,
    /// Set when a pattern was given and matched nothing.
    pub unmatched_pattern: Option<String>,
    /// Field-path comparison when true, whole-file otherwise.
    pub field_comparison: bool,
    pub cases: Vec<CaseResult>,
}

impl HarnessReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    /// True when no case failed, including runs with nothing to do.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}
