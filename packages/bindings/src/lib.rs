use napi::Result as NapiResult;
use napi_derive::napi;

use car_loan_core::amortization;
use car_loan_core::analysis::{self, ComparisonInput};
use car_loan_core::params::{self, LoanParameters};
use car_loan_core::presentation;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Full comparison: rows, display rows, summary statistics and summary text.
#[napi]
pub fn analyze_comparison(input_json: String) -> NapiResult<String> {
    let input: ComparisonInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze_comparison(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Raw rows only, for front ends that format on their side.
#[napi]
pub fn compute_comparison(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    params::validate_parameters(&input).map_err(to_napi_error)?;
    let rows = amortization::compute_comparison(input.principal, input.term_months, &input.apr_rates);
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[napi]
pub fn monthly_payment(principal: f64, apr: f64, months: u32) -> NapiResult<f64> {
    let input = LoanParameters {
        principal,
        term_months: months,
        apr_rates: vec![apr],
    };
    params::validate_parameters(&input).map_err(to_napi_error)?;
    Ok(amortization::compute_monthly_payment(principal, apr, months))
}

#[napi]
pub fn apr_sweep(start: f64, end: f64, step: f64) -> NapiResult<Vec<f64>> {
    params::apr_sweep(start, end, step).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(value: f64) -> String {
    presentation::format_currency(value)
}

#[napi]
pub fn format_percentage(value: f64, decimals: Option<u32>) -> String {
    presentation::format_percentage(
        value,
        decimals.unwrap_or(presentation::DEFAULT_PERCENT_DECIMALS),
    )
}

#[napi]
pub fn format_difference(delta: f64, apr: f64) -> String {
    presentation::format_difference(delta, apr)
}

/// Colour class for a difference: "favorable", "neutral" or "costlier".
#[napi]
pub fn delta_tone(delta: f64) -> NapiResult<String> {
    let tone = presentation::DeltaTone::classify(delta);
    match serde_json::to_value(tone).map_err(to_napi_error)? {
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}
