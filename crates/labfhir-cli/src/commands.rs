use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use serde::Serialize;
use tracing::{info, info_span, warn};

use labfhir_core::{
    Assembly, CompletionOutput, PipelineContext, output_path, to_json_string, write_json,
};
use labfhir_extract::{PATTERN_LIBRARY, UpstreamError};
use labfhir_model::Bundle;
use labfhir_regress::{HarnessConfig, HarnessMode, HarnessReport};

use labfhir_cli::config::CliConfig;
use labfhir_cli::logging::redact_value;

use crate::cli::{ExtractArgs, ImportArgs, RunTestsArgs};
use crate::summary::apply_table_style;
use crate::types::{ConversionSummary, DocumentKind};

/// Suffix used when neither the flag, the config file, nor the executable
/// name provides one.
const FALLBACK_SUFFIX: &str = "labfhir";

pub fn run_patterns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Labels", "LOINC", "Display", "Default unit"]);
    apply_table_style(&mut table);
    for entry in PATTERN_LIBRARY {
        table.add_row(vec![
            entry.field.to_string(),
            entry.labels.join(" | "),
            entry.loinc_code.to_string(),
            entry.display.to_string(),
            entry.default_unit.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_extract(args: &ExtractArgs, config: &CliConfig) -> Result<ConversionSummary> {
    let text = read_input(&args.input)?;
    let _span = info_span!("document", input = %args.input.display()).entered();
    let options = config.pipeline_options(
        args.rules.map(Into::into),
        args.derivation.map(Into::into),
    );
    info!(rule_set = %options.rule_set, derivation = %options.derivation, "extracting");
    let context = PipelineContext::new().with_options(options);
    let assembly = context.process_text(&text);
    log_bundle(&assembly.bundle);

    let suffix = config.output_suffix(args.output_suffix.as_deref(), &executable_stem());
    let output = emit(&args.input, &suffix, args.stdout, &assembly.bundle)?;
    Ok(bundle_summary(&args.input, output, assembly))
}

pub fn run_import(args: &ImportArgs, config: &CliConfig) -> Result<ConversionSummary> {
    let text = read_input(&args.input)?;
    let _span = info_span!("document", input = %args.input.display()).entered();
    let context = PipelineContext::new().with_options(config.pipeline_options(None, None));
    let suffix = config.output_suffix(args.output_suffix.as_deref(), &executable_stem());

    let result = if args.completion {
        context.process_completion(&text).map(Imported::Completion)
    } else {
        context.process_structured(&text).map(Imported::Bundle)
    };
    let summary = match result {
        Ok(Imported::Bundle(assembly)) => {
            log_bundle(&assembly.bundle);
            let output = emit(&args.input, &suffix, args.stdout, &assembly.bundle)?;
            bundle_summary(&args.input, output, assembly)
        }
        Ok(Imported::Completion(CompletionOutput { document, warnings })) => {
            let output = emit(&args.input, &suffix, args.stdout, &document)?;
            ConversionSummary {
                input: args.input.clone(),
                output,
                kind: DocumentKind::Completion,
                warnings,
            }
        }
        Err(error) => upstream_failure(&args.input, &suffix, args.stdout, &error)?,
    };
    Ok(summary)
}

pub fn run_tests(args: &RunTestsArgs) -> Result<HarnessReport> {
    let mode = if args.baseline {
        HarnessMode::Baseline
    } else {
        HarnessMode::Verify
    };
    let config = HarnessConfig::new(args.program.clone(), args.test_root.clone())
        .with_program_args(args.program_args.clone())
        .with_pattern(args.pattern.clone())
        .with_field_file(args.field_file.clone())
        .with_mode(mode)
        .with_output_suffix(args.output_suffix.clone());
    let report = labfhir_regress::run(&config)?;
    Ok(report)
}

enum Imported {
    Bundle(Assembly),
    Completion(CompletionOutput),
}

fn upstream_failure(
    input: &Path,
    suffix: &str,
    stdout: bool,
    error: &UpstreamError,
) -> Result<ConversionSummary> {
    warn!("{error}");
    let output = emit(input, suffix, stdout, &error.to_error_document())?;
    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output,
        kind: DocumentKind::Error(error.to_string()),
        warnings: Vec::new(),
    })
}

fn bundle_summary(input: &Path, output: Option<PathBuf>, assembly: Assembly) -> ConversionSummary {
    ConversionSummary {
        input: input.to_path_buf(),
        output,
        kind: DocumentKind::Bundle {
            observations: assembly.bundle.observations().count(),
        },
        warnings: assembly.warnings,
    }
}

fn log_bundle(bundle: &Bundle) {
    let patient = bundle
        .patient()
        .and_then(|patient| patient.name.first())
        .map_or("", |name| name.text.as_str());
    info!(
        patient = %redact_value(patient),
        observations = bundle.observations().count(),
        "assembled bundle"
    );
}

/// OCR output is not always valid UTF-8; invalid sequences are replaced.
fn read_input(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `value` next to the input, or prints it when `stdout` is set.
/// Returns the written path.
fn emit<T: Serialize + ?Sized>(
    input: &Path,
    suffix: &str,
    stdout: bool,
    value: &T,
) -> Result<Option<PathBuf>> {
    if stdout {
        println!("{}", to_json_string(value)?);
        return Ok(None);
    }
    let path = output_path(input, suffix);
    write_json(&path, value).with_context(|| format!("write {}", path.display()))?;
    info!(output = %path.display(), "wrote output");
    Ok(Some(path))
}

fn executable_stem() -> String {
    env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| FALLBACK_SUFFIX.to_string())
}
