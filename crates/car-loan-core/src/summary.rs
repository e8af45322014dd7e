use serde::{Deserialize, Serialize};

use crate::amortization::LoanRow;
use crate::error::LoanError;
use crate::presentation::{format_currency, format_percentage, DEFAULT_PERCENT_DECIMALS};
use crate::types::*;
use crate::LoanResult;

pub const DEFAULT_COMPARE_FROM_APR: Apr = 1.5;
pub const DEFAULT_COMPARE_TO_APR: Apr = 2.0;

/// A value and the APR at which it occurs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub apr: Apr,
    pub value: Money,
}

/// Named two-point comparison; the `Option` fields are `None` when the APR is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    pub from_apr: Apr,
    pub to_apr: Apr,
    pub from_total_interest: Option<Money>,
    pub to_total_interest: Option<Money>,
    /// `to` total paid minus `from` total paid
    pub delta: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub loan_amount: Money,
    pub term_months: Months,
    pub min_interest: Option<RatePoint>,
    pub max_interest: Option<RatePoint>,
    pub min_payment: Option<RatePoint>,
    pub max_payment: Option<RatePoint>,
    pub comparison: RateComparison,
}

/// Row whose APR matches exactly.
pub fn find_row(comparison: &[LoanRow], apr: Apr) -> LoanResult<&LoanRow> {
    comparison
        .iter()
        .find(|row| row.apr == apr)
        .ok_or(LoanError::RateNotFound { apr })
}

fn extreme(
    comparison: &[LoanRow],
    value: impl Fn(&LoanRow) -> Money,
    pick_max: bool,
) -> Option<RatePoint> {
    let points = comparison.iter().map(|row| RatePoint {
        apr: row.apr,
        value: value(row),
    });
    // First occurrence wins on ties
    if pick_max {
        points.reduce(|best, p| if p.value > best.value { p } else { best })
    } else {
        points.reduce(|best, p| if p.value < best.value { p } else { best })
    }
}

fn compare_rates(comparison: &[LoanRow], from_apr: Apr, to_apr: Apr) -> RateComparison {
    let lookup = |apr: Apr| match find_row(comparison, apr) {
        Ok(row) => Some(row),
        Err(e) => {
            log::warn!("{e}; two-point comparison unavailable");
            None
        }
    };
    let from = lookup(from_apr);
    let to = lookup(to_apr);

    RateComparison {
        from_apr,
        to_apr,
        from_total_interest: from.map(|r| r.total_interest),
        to_total_interest: to.map(|r| r.total_interest),
        delta: from.zip(to).map(|(f, t)| t.total_paid - f.total_paid),
    }
}

pub fn summarize(
    comparison: &[LoanRow],
    loan_amount: Money,
    term_months: Months,
    from_apr: Apr,
    to_apr: Apr,
) -> SummaryStatistics {
    SummaryStatistics {
        loan_amount,
        term_months,
        min_interest: extreme(comparison, |r| r.total_interest, false),
        max_interest: extreme(comparison, |r| r.total_interest, true),
        min_payment: extreme(comparison, |r| r.monthly_payment, false),
        max_payment: extreme(comparison, |r| r.monthly_payment, true),
        comparison: compare_rates(comparison, from_apr, to_apr),
    }
}

fn pct(apr: Apr) -> String {
    format_percentage(apr, DEFAULT_PERCENT_DECIMALS)
}

fn point_line(point: Option<RatePoint>) -> String {
    match point {
        Some(p) => format!("{} at {} APR", format_currency(p.value), pct(p.apr)),
        None => "n/a".to_string(),
    }
}

/// Plain-text rendering of [`SummaryStatistics`]
pub fn render_summary(stats: &SummaryStatistics) -> String {
    let mut lines = Vec::with_capacity(8);
    lines.push("Loan Summary".to_string());
    lines.push(format!("  Loan amount:            {}", format_currency(stats.loan_amount)));
    lines.push(format!(
        "  Term:                   {} months ({:.1} years)",
        stats.term_months,
        f64::from(stats.term_months) / 12.0
    ));
    lines.push(format!("  Lowest total interest:  {}", point_line(stats.min_interest)));
    lines.push(format!("  Highest total interest: {}", point_line(stats.max_interest)));

    let payment_range = match (stats.min_payment, stats.max_payment) {
        (Some(lo), Some(hi)) => format!(
            "{} to {}",
            format_currency(lo.value),
            format_currency(hi.value)
        ),
        _ => "n/a".to_string(),
    };
    lines.push(format!("  Monthly payment range:  {payment_range}"));

    let c = &stats.comparison;
    let label = format!("{} vs {} APR", pct(c.from_apr), pct(c.to_apr));
    let detail = match (c.from_total_interest, c.to_total_interest, c.delta) {
        (Some(from), Some(to), Some(delta)) => format!(
            "total interest {} vs {}, difference {}",
            format_currency(from),
            format_currency(to),
            format_currency(delta)
        ),
        _ => {
            let missing: Vec<String> = [
                (c.from_apr, c.from_total_interest),
                (c.to_apr, c.to_total_interest),
            ]
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(apr, _)| pct(*apr))
            .collect();
            format!("n/a ({} not in comparison)", missing.join(" and "))
        }
    };
    lines.push(format!("  {label}: {detail}"));

    lines.join("\n")
}

/// Summary text using the default 1.5% vs 2.0% comparison.
pub fn build_summary_text(comparison: &[LoanRow], loan_amount: Money, term_months: Months) -> String {
    let stats = summarize(
        comparison,
        loan_amount,
        term_months,
        DEFAULT_COMPARE_FROM_APR,
        DEFAULT_COMPARE_TO_APR,
    );
    render_summary(&stats)
}
