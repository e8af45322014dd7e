use clap::Args;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tabled::{builder::Builder, Table};

use car_loan_core::analysis::{self, ComparisonReport};
use car_loan_core::params::LoanParameters;
use car_loan_core::presentation::{
    format_currency, format_percentage, BASELINE_SENTINEL, DEFAULT_PERCENT_DECIMALS,
};

use super::compare::{resolve_input, LoanArgs};

/// Arguments for the paginated report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Where to write the report
    #[arg(long, default_value = "car_loan_report.txt")]
    pub out: PathBuf,

    /// Lines per page, footer included
    #[arg(long, default_value = "50")]
    pub page_lines: usize,

    /// Report title
    #[arg(long, default_value = "Car Loan APR Comparison")]
    pub title: String,
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input = resolve_input(&args.loan)?;
    let output = analysis::analyze_comparison(&comparison_input)?;

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let lines = render_report(&args.title, &generated, &comparison_input.params, &output.result);
    let pages = paginate(&lines, args.page_lines);

    fs::write(&args.out, pages.join("\n\u{c}\n"))
        .map_err(|e| format!("Failed to write '{}': {}", args.out.display(), e))?;
    log::info!("wrote {} page(s) to {}", pages.len(), args.out.display());

    Ok(json!({
        "result": {
            "summary_text": output.result.summary_text,
            "report_path": args.out.display().to_string(),
            "pages": pages.len(),
            "rates": output.result.rows.len(),
        },
        "methodology": output.methodology,
        "warnings": output.warnings,
        "metadata": output.metadata,
    }))
}

fn comparison_table(report: &ComparisonReport) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "APR",
        "Monthly Payment",
        "Total Interest",
        "Total Paid",
        "Interest %",
        "Difference",
    ]);
    for row in &report.display_rows {
        builder.push_record([
            row.apr.as_str(),
            row.monthly_payment.as_str(),
            row.total_interest.as_str(),
            row.total_paid.as_str(),
            row.interest_pct_of_principal.as_str(),
            row.difference.as_str(),
        ]);
    }
    Table::from(builder).to_string()
}

/// Report body as lines: title, comparison table, summary, per-rate breakdown.
pub fn render_report(
    title: &str,
    generated: &str,
    params: &LoanParameters,
    report: &ComparisonReport,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    lines.push(title.to_string());
    lines.push("=".repeat(title.chars().count()));
    lines.push(format!("Generated: {generated}"));
    lines.push(format!(
        "Loan amount {} over {} months, {} rates",
        format_currency(params.principal),
        params.term_months,
        params.apr_rates.len()
    ));
    lines.push(String::new());

    lines.push("Comparison Table".to_string());
    lines.push("----------------".to_string());
    lines.extend(comparison_table(report).lines().map(str::to_string));
    lines.push(String::new());

    lines.push("Summary Statistics".to_string());
    lines.push("------------------".to_string());
    lines.extend(report.summary_text.lines().map(str::to_string));
    lines.push(String::new());

    lines.push("Detailed Breakdown".to_string());
    lines.push("------------------".to_string());
    for (row, display) in report.rows.iter().zip(&report.display_rows) {
        lines.push(format!("{} APR", display.apr));
        lines.push(format!("  Monthly payment:  {}", display.monthly_payment));
        lines.push(format!(
            "  Total interest:   {} ({} of principal)",
            display.total_interest, display.interest_pct_of_principal
        ));
        lines.push(format!("  Total paid:       {}", display.total_paid));
        if display.difference != BASELINE_SENTINEL {
            lines.push(format!(
                "  Versus previous:  {} ({})",
                display.difference,
                format_percentage(
                    row.difference_from_previous / params.principal * 100.0,
                    DEFAULT_PERCENT_DECIMALS
                )
            ));
        }
    }

    lines
}

/// Split into pages of `page_lines`, each ending in a `Page n of m` footer.
pub fn paginate(lines: &[String], page_lines: usize) -> Vec<String> {
    // Blank separator plus footer
    let body = page_lines.saturating_sub(2).max(1);
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(body).collect()
    };
    let total = chunks.len();

    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut page = chunk.join("\n");
            page.push_str(&format!("\n\nPage {} of {}", i + 1, total));
            page
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_loan_core::analysis::ComparisonInput;
    use pretty_assertions::assert_eq;

    fn default_report() -> (LoanParameters, ComparisonReport) {
        let input = ComparisonInput::default();
        let output = analysis::analyze_comparison(&input).unwrap();
        (input.params, output.result)
    }

    #[test]
    fn test_report_sections_in_order() {
        let (params, report) = default_report();
        let lines = render_report("Car Loan APR Comparison", "2026-01-01 09:00", &params, &report);

        let pos = |needle: &str| lines.iter().position(|l| l == needle).unwrap();
        assert!(pos("Comparison Table") < pos("Summary Statistics"));
        assert!(pos("Summary Statistics") < pos("Detailed Breakdown"));
        assert!(lines.iter().any(|l| l.contains("$6,398.72")));
        assert!(lines.iter().any(|l| l == "2.00% APR"));
    }

    #[test]
    fn test_baseline_row_has_no_versus_line() {
        let (params, report) = default_report();
        let lines = render_report("t", "now", &params, &report);
        let start = lines.iter().position(|l| l == "0.00% APR").unwrap();
        assert!(!lines[start + 4].contains("Versus previous"));
        assert!(lines[start + 4..].iter().any(|l| l.contains("Versus previous")));
    }

    #[test]
    fn test_paginate_footers() {
        let lines: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        let pages = paginate(&lines, 6);

        assert_eq!(pages.len(), 3);
        assert!(pages[0].starts_with("line 0\nline 1\nline 2\nline 3\n\nPage 1 of 3"));
        assert!(pages[2].ends_with("Page 3 of 3"));
    }

    #[test]
    fn test_paginate_empty_and_tiny_pages() {
        assert_eq!(paginate(&[], 50), vec!["\n\nPage 1 of 1".to_string()]);
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(paginate(&lines, 1).len(), 2);
    }
}
