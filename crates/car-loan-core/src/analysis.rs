use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_comparison, LoanComparison};
use crate::params::{validate_parameters, LoanParameters};
use crate::presentation::{build_detailed_view_with, BaselineMarker, DisplayRow};
use crate::summary::{
    render_summary, summarize, SummaryStatistics, DEFAULT_COMPARE_FROM_APR,
    DEFAULT_COMPARE_TO_APR,
};
use crate::types::*;
use crate::LoanResult;

/// Loan parameters plus presentation choices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonInput {
    #[serde(flatten)]
    pub params: LoanParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_from: Option<Apr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_to: Option<Apr>,
    #[serde(default)]
    pub baseline: BaselineMarker,
}

/// Everything a front end needs to render one comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub rows: LoanComparison,
    pub display_rows: Vec<DisplayRow>,
    pub summary: SummaryStatistics,
    pub summary_text: String,
}

/// Validate, compute and format a full comparison.
pub fn analyze_comparison(
    input: &ComparisonInput,
) -> LoanResult<ComputationOutput<ComparisonReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let params = &input.params;

    validate_parameters(params)?;

    let rows = compute_comparison(params.principal, params.term_months, &params.apr_rates);
    let display_rows = build_detailed_view_with(&rows, params.principal, input.baseline);

    let from_apr = input.compare_from.unwrap_or(DEFAULT_COMPARE_FROM_APR);
    let to_apr = input.compare_to.unwrap_or(DEFAULT_COMPARE_TO_APR);
    let summary = summarize(&rows, params.principal, params.term_months, from_apr, to_apr);

    if summary.comparison.delta.is_none() {
        warnings.push(format!(
            "Named comparison {from_apr}% vs {to_apr}% APR unavailable: rate missing from the sweep"
        ));
    }
    if input.baseline == BaselineMarker::ZeroRate && params.apr_rates.first() != Some(&0.0) {
        warnings.push(
            "Sweep does not start at 0% APR; first row difference shown as $0.00 instead of '-'"
                .into(),
        );
    }

    let summary_text = render_summary(&summary);
    let output = ComparisonReport {
        rows,
        display_rows,
        summary,
        summary_text,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortizing loan payment across an APR sweep",
        input,
        warnings,
        elapsed,
        output,
    ))
}
