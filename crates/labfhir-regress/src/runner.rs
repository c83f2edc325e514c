//! Runs the program under test over each selected case.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, info_span, warn};

use crate::compare::{Comparison, compare_fields, compare_files};
use crate::config::{HarnessConfig, HarnessMode};
use crate::discovery::{CaseFilter, discover_inputs, relative_key, select_cases};
use crate::error::Result;
use crate::field_path::FieldPath;
use crate::report::{CaseFailure, CaseOutcome, CaseResult, HarnessReport};

/// `<base>-<suffix>.json` and `<base>-<suffix>-baseline.json` for an input,
/// where `<base>` is the input without its extension.
pub fn case_paths(input: &Path, suffix: &str) -> (PathBuf, PathBuf) {
    let base = input.with_extension("");
    let base = base.to_string_lossy();
    (
        PathBuf::from(format!("{base}-{suffix}.json")),
        PathBuf::from(format!("{base}-{suffix}-baseline.json")),
    )
}

/// Validates the configuration, then runs every selected case in order.
///
/// A failing case never stops the run; configuration problems stop it before
/// the first case.
pub fn run(config: &HarnessConfig) -> Result<HarnessReport> {
    let fields = config.validate()?;
    let filter = CaseFilter::from_pattern(config.pattern.as_deref())?;
    let inputs = discover_inputs(&config.test_root)?;
    let selected = select_cases(&config.test_root, inputs, &filter);

    let mut report = HarnessReport {
        mode: config.mode,
        unmatched_pattern: None,
        field_comparison: fields.is_some(),
        cases: Vec::with_capacity(selected.len()),
    };

    if selected.is_empty() {
        if let Some(pattern) = &config.pattern {
            info!(pattern = %pattern, "no files found matching pattern");
            report.unmatched_pattern = Some(pattern.clone());
        }
        return Ok(report);
    }
    if let Some(fields) = &fields {
        info!(count = fields.len(), "using field comparison");
    }

    let suffix = config.suffix();
    for input in selected {
        let name = relative_key(&config.test_root, &input);
        let _span = info_span!("case", name = %name).entered();
        let result = run_case(config, &suffix, fields.as_deref(), input, name);
        match &result.outcome {
            CaseOutcome::Failed(failure) => warn!("FAIL: {}", failure.summary()),
            outcome => info!("{}", outcome.label()),
        }
        report.cases.push(result);
    }

    Ok(report)
}

fn run_case(
    config: &HarnessConfig,
    suffix: &str,
    fields: Option<&[FieldPath]>,
    input: PathBuf,
    name: String,
) -> CaseResult {
    let (output, baseline) = case_paths(&input, suffix);
    let outcome = match clear_output(&output).and_then(|()| invoke(config, &input)) {
        Err(failure) => CaseOutcome::Failed(failure),
        Ok(()) => match config.mode {
            HarnessMode::Baseline => write_baseline(&output, &baseline),
            HarnessMode::Verify => verify(&output, &baseline, fields),
        },
    };
    CaseResult {
        input,
        name,
        output,
        baseline,
        outcome,
    }
}

/// Removes output left by an earlier run so only fresh output is compared.
fn clear_output(output: &Path) -> std::result::Result<(), CaseFailure> {
    match fs::remove_file(output) {
        Ok(()) => {
            debug!(output = %output.display(), "removed stale output");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(CaseFailure::StaleOutput(err.to_string())),
    }
}

fn invoke(config: &HarnessConfig, input: &Path) -> std::result::Result<(), CaseFailure> {
    info!(
        program = %config.program.display(),
        args = ?config.program_args,
        input = %input.display(),
        "running"
    );
    let output = Command::new(&config.program)
        .args(&config.program_args)
        .arg(input)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| CaseFailure::Spawn(err.to_string()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        debug!(stdout = %stdout.trim_end(), "program output");
    }
    if output.status.success() {
        return Ok(());
    }
    Err(CaseFailure::ProgramFailed {
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
    })
}

fn write_baseline(output: &Path, baseline: &Path) -> CaseOutcome {
    if !output.is_file() {
        return CaseOutcome::Failed(CaseFailure::MissingOutput(output.to_path_buf()));
    }
    match fs::copy(output, baseline) {
        Ok(_) => {
            info!(baseline = %baseline.display(), "baseline written");
            CaseOutcome::BaselineWritten
        }
        Err(err) => CaseOutcome::Failed(CaseFailure::BaselineWrite(err.to_string())),
    }
}

fn verify(output: &Path, baseline: &Path, fields: Option<&[FieldPath]>) -> CaseOutcome {
    if !baseline.is_file() {
        return CaseOutcome::NoBaseline;
    }
    if !output.is_file() {
        return CaseOutcome::Failed(CaseFailure::MissingOutput(output.to_path_buf()));
    }
    let comparison = match fields {
        Some(fields) => compare_fields(output, baseline, fields),
        None => compare_files(output, baseline),
    };
    match comparison {
        Comparison::Identical => CaseOutcome::Passed,
        Comparison::ContentDiffers {
            output_sha256,
            baseline_sha256,
        } => CaseOutcome::Failed(CaseFailure::ContentDiffers {
            output_sha256,
            baseline_sha256,
        }),
        Comparison::FieldsDiffer(diffs) => CaseOutcome::Failed(CaseFailure::FieldsDiffer(diffs)),
        Comparison::Unreadable(message) => CaseOutcome::Failed(CaseFailure::Unreadable(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_paths() {
        let (output, baseline) = case_paths(Path::new("records/user-1/input-1.txt"), "fhir_regex");
        assert_eq!(output, PathBuf::from("records/user-1/input-1-fhir_regex.json"));
        assert_eq!(
            baseline,
            PathBuf::from("records/user-1/input-1-fhir_regex-baseline.json")
        );
    }
}
