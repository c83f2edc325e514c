use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use serde_json::Value;

use labfhir_model::{IssueSeverity, ValidationIssue};
use labfhir_regress::{
    CaseFailure, CaseOutcome, CaseResult, FieldDifference, HarnessMode, HarnessReport,
    short_digest,
};

use crate::types::{ConversionSummary, DocumentKind};

pub fn print_conversion(summary: &ConversionSummary) {
    if let Some(path) = &summary.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Document"),
        header_cell("Observations"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let (document, observations) = match &summary.kind {
        DocumentKind::Bundle { observations } => (
            Cell::new("Bundle")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new(observations),
        ),
        DocumentKind::Completion => (Cell::new("Completion").fg(Color::Blue), dim_cell("-")),
        DocumentKind::Error(_) => (
            Cell::new("Error")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
        ),
    };
    table.add_row(vec![
        Cell::new(summary.input.display()),
        document,
        observations,
        count_cell(summary.error_count(), Color::Red),
        count_cell(summary.warning_count(), Color::Yellow),
    ]);
    println!("{table}");
    print_issue_table(&summary.warnings);
    if let DocumentKind::Error(message) = &summary.kind {
        eprintln!("error: {message}");
    }
}

fn print_issue_table(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut sorted: Vec<&ValidationIssue> = issues.iter().collect();
    sorted.sort_by(|a, b| a.severity.cmp(&b.severity).then_with(|| a.code.cmp(&b.code)));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Path"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in sorted {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            issue
                .path
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Validation:");
    println!("{table}");
}

pub fn print_harness_report(report: &HarnessReport) {
    if let Some(pattern) = &report.unmatched_pattern {
        println!("No files found matching pattern: {pattern}");
        return;
    }
    if report.cases.is_empty() {
        println!("No test inputs found");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Result"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for case in &report.cases {
        table.add_row(vec![
            Cell::new(&case.name),
            outcome_cell(&case.outcome),
            detail_cell(case),
        ]);
    }
    println!("{table}");
    print_case_details(&report.cases);

    let mode = match report.mode {
        HarnessMode::Verify if report.field_comparison => "verify, field comparison",
        HarnessMode::Verify => "verify, whole-file comparison",
        HarnessMode::Baseline => "baseline",
    };
    println!(
        "{} passed, {} failed ({mode})",
        report.passed(),
        report.failed()
    );
}

/// Field diffs and program stderr, which do not fit in a table cell.
fn print_case_details(cases: &[CaseResult]) {
    for case in cases {
        match &case.outcome {
            CaseOutcome::Failed(CaseFailure::FieldsDiffer(diffs)) => {
                println!();
                println!("{}:", case.name);
                for diff in diffs {
                    println!("  {}", field_diff_line(diff));
                }
            }
            CaseOutcome::Failed(CaseFailure::ProgramFailed { stderr, .. })
                if !stderr.is_empty() =>
            {
                println!();
                println!("{} (stderr):", case.name);
                for line in stderr.lines() {
                    println!("  {line}");
                }
            }
            _ => {}
        }
    }
}

pub fn field_diff_line(diff: &FieldDifference) -> String {
    format!(
        "{}: baseline={} output={}",
        diff.path,
        display_value(diff.baseline.as_ref()),
        display_value(diff.output.as_ref())
    )
}

fn display_value(value: Option<&Value>) -> String {
    value.map_or_else(|| "<absent>".to_string(), ToString::to_string)
}

fn outcome_cell(outcome: &CaseOutcome) -> Cell {
    let cell = Cell::new(outcome.label());
    match outcome {
        CaseOutcome::Passed => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        CaseOutcome::NoBaseline => cell.fg(Color::Yellow),
        CaseOutcome::BaselineWritten => cell.fg(Color::Cyan),
        CaseOutcome::Failed(_) => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

fn detail_cell(case: &CaseResult) -> Cell {
    match &case.outcome {
        CaseOutcome::Failed(CaseFailure::ContentDiffers {
            output_sha256,
            baseline_sha256,
        }) => Cell::new(format!(
            "differs from baseline (output {}, baseline {})",
            short_digest(output_sha256),
            short_digest(baseline_sha256)
        )),
        CaseOutcome::Failed(failure) => Cell::new(failure.summary()),
        CaseOutcome::BaselineWritten => dim_cell(case.baseline.display()),
        CaseOutcome::Passed | CaseOutcome::NoBaseline => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_diff_line() {
        let diff = FieldDifference {
            path: "entry.2.resource.valueQuantity.value".to_string(),
            baseline: Some(json!(210.0)),
            output: None,
        };
        assert_eq!(
            field_diff_line(&diff),
            "entry.2.resource.valueQuantity.value: baseline=210.0 output=<absent>"
        );
    }
}
