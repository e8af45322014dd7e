use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::*;
use crate::LoanResult;

pub const MIN_TERM_MONTHS: Months = 1;
pub const MAX_TERM_MONTHS: Months = 120;
pub const MAX_PRINCIPAL: Money = 10_000_000.0;
pub const MAX_APR: Apr = 100.0;
pub const MAX_RATES: usize = 1_000;

pub const DEFAULT_PRINCIPAL: Money = 40_000.0;
pub const DEFAULT_TERM_MONTHS: Months = 60;
pub const DEFAULT_MIN_APR: Apr = 0.0;
pub const DEFAULT_MAX_APR: Apr = 6.0;
pub const DEFAULT_APR_STEP: Apr = 0.5;

/// Sweep values are snapped to this many places so 0.1-style steps land on the end point.
const SWEEP_DECIMALS: u32 = 10;

/// Principal, term and the APRs to compare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub term_months: Months,
    /// Ascending, non-negative, percentage points.
    pub apr_rates: Vec<Apr>,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: DEFAULT_PRINCIPAL,
            term_months: DEFAULT_TERM_MONTHS,
            apr_rates: apr_sweep(DEFAULT_MIN_APR, DEFAULT_MAX_APR, DEFAULT_APR_STEP)
                .unwrap_or_else(|_| vec![DEFAULT_MIN_APR]),
        }
    }
}

fn sweep_bound(field: &str, value: Apr) -> LoanResult<()> {
    if !value.is_finite() || !(0.0..=MAX_APR).contains(&value) {
        return Err(LoanError::InvalidInput {
            field: field.into(),
            reason: format!("Sweep bound must be between 0 and {MAX_APR}, got {value}"),
        });
    }
    Ok(())
}

/// Inclusive ascending sweep from `start` to `end`.
///
/// Both bounds must lie in `0..=MAX_APR` and the sweep may hold at most
/// [`MAX_RATES`] values. A non-positive or infinite step, or `end < start`,
/// yields just `[start]`.
pub fn apr_sweep(start: Apr, end: Apr, step: Apr) -> LoanResult<Vec<Apr>> {
    sweep_bound("min_apr", start)?;
    sweep_bound("max_apr", end)?;
    if step.is_nan() {
        return Err(LoanError::InvalidInput {
            field: "step".into(),
            reason: "Sweep step must be a number".into(),
        });
    }
    if step <= 0.0 || end < start || !step.is_finite() {
        return Ok(vec![start]);
    }

    // Half a step of slack so the end point survives float accumulation
    let steps = ((end - start) / step + 0.5).floor();
    if steps >= MAX_RATES as f64 {
        return Err(LoanError::InvalidInput {
            field: "step".into(),
            reason: format!("Sweep would exceed {MAX_RATES} rates"),
        });
    }

    Ok((0..=steps as usize)
        .map(|i| snap(start + step * i as f64))
        .filter(|apr| *apr <= end + step * 1e-9)
        .collect())
}

fn snap(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(SWEEP_DECIMALS))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Range checks the engine itself never performs.
pub fn validate_parameters(params: &LoanParameters) -> LoanResult<()> {
    if !params.principal.is_finite() || params.principal <= 0.0 {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be a positive number".into(),
        });
    }
    if params.principal > MAX_PRINCIPAL {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: format!("Loan amount must not exceed {MAX_PRINCIPAL}"),
        });
    }
    if !(MIN_TERM_MONTHS..=MAX_TERM_MONTHS).contains(&params.term_months) {
        return Err(LoanError::InvalidInput {
            field: "term_months".into(),
            reason: format!(
                "Term must be between {MIN_TERM_MONTHS} and {MAX_TERM_MONTHS} months"
            ),
        });
    }
    if params.apr_rates.is_empty() {
        return Err(LoanError::InvalidInput {
            field: "apr_rates".into(),
            reason: "At least one APR is required".into(),
        });
    }
    if params.apr_rates.len() > MAX_RATES {
        return Err(LoanError::InvalidInput {
            field: "apr_rates".into(),
            reason: format!("At most {MAX_RATES} APRs can be compared"),
        });
    }

    for (i, apr) in params.apr_rates.iter().enumerate() {
        if !apr.is_finite() || *apr < 0.0 || *apr > MAX_APR {
            return Err(LoanError::InvalidInput {
                field: format!("apr_rates[{i}]"),
                reason: format!("APR must be between 0 and {MAX_APR}, got {apr}"),
            });
        }
    }

    if let Some(pos) = params.apr_rates.windows(2).position(|w| w[1] <= w[0]) {
        return Err(LoanError::InvalidInput {
            field: format!("apr_rates[{}]", pos + 1),
            reason: "APR sequence must be strictly increasing".into(),
        });
    }

    Ok(())
}
