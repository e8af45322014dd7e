use serde::{Deserialize, Serialize};

use crate::types::*;

/// Result for a single APR in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    pub apr: Apr,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    /// `total_paid` minus the previous row's `total_paid`; 0 for the first row.
    pub difference_from_previous: Money,
}

/// One row per input APR, in input order.
pub type LoanComparison = Vec<LoanRow>;

/// Fixed monthly payment for a fully amortizing loan.
///
/// `apr` is in percentage points. A zero rate is straight division; any
/// other rate uses PMT = P * r(1 + r)^n / ((1 + r)^n - 1) with r = apr / 1200.
pub fn compute_monthly_payment(principal: Money, apr: Apr, months: Months) -> Money {
    let n = f64::from(months);
    if apr == 0.0 {
        return principal / n;
    }

    let monthly_rate = apr / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powf(n);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Payment and totals for one APR. `difference_from_previous` is left at 0;
/// only [`compute_comparison`] knows the neighbouring row.
pub fn compute_loan_details(principal: Money, apr: Apr, months: Months) -> LoanRow {
    let monthly_payment = compute_monthly_payment(principal, apr, months);
    let total_paid = monthly_payment * f64::from(months);

    LoanRow {
        apr,
        monthly_payment,
        total_paid,
        total_interest: total_paid - principal,
        difference_from_previous: 0.0,
    }
}

/// Compute one row per rate, in the order given.
///
/// The rates are not re-sorted: adjacent deltas are only meaningful when the
/// caller supplies an ascending sequence.
pub fn compute_comparison(principal: Money, months: Months, apr_rates: &[Apr]) -> LoanComparison {
    log::debug!(
        "computing comparison: principal={principal}, months={months}, rates={}",
        apr_rates.len()
    );

    let mut rows: LoanComparison = Vec::with_capacity(apr_rates.len());
    let mut previous_total: Option<Money> = None;

    for &apr in apr_rates {
        let mut row = compute_loan_details(principal, apr, months);
        if let Some(prev) = previous_total {
            row.difference_from_previous = row.total_paid - prev;
        }
        previous_total = Some(row.total_paid);
        rows.push(row);
    }

    rows
}
