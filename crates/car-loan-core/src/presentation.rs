//! Display strings for comparison rows.
//!
//! Money is rounded half away from zero to two places on the exact binary
//! value of the `f64`, via `rust_decimal`. Every money-valued field goes
//! through [`format_currency`] so the policy is uniform.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::amortization::LoanRow;
use crate::types::*;

pub const CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_PERCENT_DECIMALS: u32 = 2;
/// Larger `decimals` requests are clamped to this.
pub const MAX_PERCENT_DECIMALS: u32 = 10;
/// Sentinel shown in place of a difference on the baseline row
pub const BASELINE_SENTINEL: &str = "-";
/// Deltas within this many currency units of zero are neutral.
pub const NEUTRAL_BAND: Money = 0.01;

/// Where the baseline sentinel goes in a detailed view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineMarker {
    /// Sentinel only when the delta is 0 and the APR is 0, as [`format_difference`] does.
    #[default]
    ZeroRate,
    /// Sentinel on the first row whatever its APR, `$0.00` never suppressed elsewhere.
    FirstRow,
}

/// Colour-coding class of a difference-from-previous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaTone {
    Favorable,
    Neutral,
    Costlier,
}

impl DeltaTone {
    pub fn classify(delta: Money) -> Self {
        if delta < -NEUTRAL_BAND {
            DeltaTone::Favorable
        } else if delta > NEUTRAL_BAND {
            DeltaTone::Costlier
        } else {
            DeltaTone::Neutral
        }
    }
}

/// One formatted line of the detailed view.
///
/// `apr_value` and `difference_value` are raw sort/colour keys; the string
/// fields are display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub apr: String,
    pub monthly_payment: String,
    pub total_interest: String,
    pub total_paid: String,
    pub interest_pct_of_principal: String,
    pub difference: String,
    pub apr_value: Apr,
    pub difference_value: Money,
    pub tone: DeltaTone,
}

fn round_decimal(value: f64, decimals: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `$1,234.57` style; negatives as `-$1,234.57`.
pub fn format_currency(value: Money) -> String {
    let Some(rounded) = round_decimal(value, 2) else {
        return value.to_string();
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}{CURRENCY_SYMBOL}{}.{frac}", group_thousands(whole))
}

/// `value` is already in percentage units: 1.5 renders as `1.50%`.
///
/// `decimals` is clamped to [`MAX_PERCENT_DECIMALS`].
pub fn format_percentage(value: f64, decimals: u32) -> String {
    let decimals = decimals.min(MAX_PERCENT_DECIMALS);
    match round_decimal(value, decimals) {
        Some(rounded) => {
            let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
            format!("{:.*}%", decimals as usize, rounded)
        }
        None => format!("{value}%"),
    }
}

/// The sentinel when both the delta and the APR are exactly zero, otherwise currency.
pub fn format_difference(delta: Money, apr: Apr) -> String {
    if delta == 0.0 && apr == 0.0 {
        BASELINE_SENTINEL.to_string()
    } else {
        format_currency(delta)
    }
}

/// Detailed view with the sentinel placed by [`format_difference`].
pub fn build_detailed_view(comparison: &[LoanRow], loan_amount: Money) -> Vec<DisplayRow> {
    build_detailed_view_with(comparison, loan_amount, BaselineMarker::ZeroRate)
}

pub fn build_detailed_view_with(
    comparison: &[LoanRow],
    loan_amount: Money,
    marker: BaselineMarker,
) -> Vec<DisplayRow> {
    comparison
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let difference = match marker {
                BaselineMarker::ZeroRate => format_difference(row.difference_from_previous, row.apr),
                BaselineMarker::FirstRow if i == 0 => BASELINE_SENTINEL.to_string(),
                BaselineMarker::FirstRow => format_currency(row.difference_from_previous),
            };

            DisplayRow {
                apr: format_percentage(row.apr, DEFAULT_PERCENT_DECIMALS),
                monthly_payment: format_currency(row.monthly_payment),
                total_interest: format_currency(row.total_interest),
                total_paid: format_currency(row.total_paid),
                interest_pct_of_principal: format_percentage(
                    row.total_interest / loan_amount * 100.0,
                    DEFAULT_PERCENT_DECIMALS,
                ),
                difference,
                apr_value: row.apr,
                difference_value: row.difference_from_previous,
                tone: DeltaTone::classify(row.difference_from_previous),
            }
        })
        .collect()
}

/// Reorder by the raw APR key, never the label.
pub fn sort_display_rows(rows: &mut [DisplayRow], descending: bool) {
    rows.sort_by(|a, b| {
        let ord = a.apr_value.total_cmp(&b.apr_value);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_comparison;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(40_000.0), "$40,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-522.894), "-$522.89");
    }

    #[test]
    fn test_currency_half_rounds_away_from_zero() {
        // 0.125 and 2.5 are exact in binary
        assert_eq!(format_currency(0.125), "$0.13");
        assert_eq!(format_currency(-0.125), "-$0.13");
        assert_eq!(format_currency(2.5), "$2.50");
    }

    #[test]
    fn test_currency_negative_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(-0.0), "$0.00");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(1.5, 2), "1.50%");
        assert_eq!(format_percentage(6.0, 1), "6.0%");
        assert_eq!(format_percentage(15.99681, 2), "16.00%");
        assert_eq!(format_percentage(3.0, 0), "3%");
        assert_eq!(format_percentage(0.125, u32::MAX), "0.1250000000%");
    }

    #[test]
    fn test_difference_sentinel() {
        assert_eq!(format_difference(0.0, 0.0), "-");
        assert_eq!(format_difference(0.0, 1.5), format_currency(0.0));
        assert_eq!(format_difference(12.5, 0.0), "$12.50");
    }

    #[test]
    fn test_tone_band() {
        assert_eq!(DeltaTone::classify(-5.0), DeltaTone::Favorable);
        assert_eq!(DeltaTone::classify(0.01), DeltaTone::Neutral);
        assert_eq!(DeltaTone::classify(-0.005), DeltaTone::Neutral);
        assert_eq!(DeltaTone::classify(0.02), DeltaTone::Costlier);
    }

    #[test]
    fn test_first_row_marker_on_nonzero_start() {
        let rows = compute_comparison(20_000.0, 48, &[1.0, 2.0]);

        let by_rate = build_detailed_view(&rows, 20_000.0);
        assert_eq!(by_rate[0].difference, "$0.00");

        let by_position = build_detailed_view_with(&rows, 20_000.0, BaselineMarker::FirstRow);
        assert_eq!(by_position[0].difference, "-");
        assert_eq!(by_position[1].difference, by_rate[1].difference);
    }

    #[test]
    fn test_sort_uses_raw_apr() {
        let rows = compute_comparison(20_000.0, 48, &[0.5, 2.0, 10.0]);
        let mut view = build_detailed_view(&rows, 20_000.0);

        sort_display_rows(&mut view, true);
        let labels: Vec<&str> = view.iter().map(|r| r.apr.as_str()).collect();
        // A string sort would put "10.00%" before "2.00%"
        assert_eq!(labels, vec!["10.00%", "2.00%", "0.50%"]);
    }
}
