use approx::assert_abs_diff_eq;
use car_loan_core::amortization::{compute_comparison, compute_loan_details, compute_monthly_payment};
use car_loan_core::params::{apr_sweep, validate_parameters, LoanParameters};
use car_loan_core::presentation::{
    build_detailed_view, format_currency, format_difference, format_percentage, DeltaTone,
    MAX_PERCENT_DECIMALS,
};
use car_loan_core::LoanError;
use car_loan_core::summary::{build_summary_text, summarize};
use pretty_assertions::assert_eq;

fn default_sweep() -> Vec<f64> {
    apr_sweep(0.0, 6.0, 0.5).unwrap()
}

fn row_at(rows: &[car_loan_core::amortization::LoanRow], apr: f64) -> &car_loan_core::amortization::LoanRow {
    rows.iter().find(|r| r.apr == apr).expect("rate in sweep")
}

// ===========================================================================
// Engine
// ===========================================================================

#[test]
fn test_reference_scenario_40k_60_months() {
    let rows = compute_comparison(40_000.0, 60, &default_sweep());
    assert_eq!(rows.len(), 13);

    let zero = row_at(&rows, 0.0);
    assert_abs_diff_eq!(zero.monthly_payment, 666.67, epsilon = 0.005);
    assert_eq!(zero.total_interest, 0.0);

    let r15 = row_at(&rows, 1.5);
    assert_abs_diff_eq!(r15.monthly_payment, 692.40, epsilon = 0.005);
    assert_abs_diff_eq!(r15.total_interest, 1543.73, epsilon = 0.01);

    let r20 = row_at(&rows, 2.0);
    assert_abs_diff_eq!(r20.monthly_payment, 701.11, epsilon = 0.005);
    assert_abs_diff_eq!(r20.total_interest, 2066.62, epsilon = 0.01);

    let r60 = row_at(&rows, 6.0);
    assert_abs_diff_eq!(r60.monthly_payment, 773.31, epsilon = 0.005);
    assert_abs_diff_eq!(r60.total_interest, 6398.72, epsilon = 0.01);

    assert_abs_diff_eq!(r20.total_paid - r15.total_paid, 522.89, epsilon = 0.01);
    assert_abs_diff_eq!(r20.difference_from_previous, 522.89, epsilon = 0.01);
}

#[test]
fn test_zero_rate_payment_for_various_terms() {
    for months in [1u32, 12, 36, 60, 84, 120] {
        for principal in [500.0, 12_345.67, 40_000.0] {
            let pmt = compute_monthly_payment(principal, 0.0, months);
            assert_abs_diff_eq!(pmt, principal / f64::from(months), epsilon = f64::EPSILON * principal);
        }
    }
}

#[test]
fn test_positive_rate_always_charges_interest() {
    for apr in [0.1, 0.5, 3.25, 6.0, 19.99] {
        let row = compute_loan_details(15_000.0, apr, 72);
        assert!(row.total_paid > 15_000.0, "apr {apr}");
        assert_eq!(row.total_interest, row.total_paid - 15_000.0);
    }
}

#[test]
fn test_monotone_totals_on_ascending_sweep() {
    let rows = compute_comparison(32_500.0, 84, &apr_sweep(0.0, 12.0, 0.25).unwrap());

    assert_eq!(rows[0].difference_from_previous, 0.0);
    for pair in rows.windows(2) {
        assert!(pair[1].total_paid >= pair[0].total_paid);
        assert!(pair[1].difference_from_previous >= 0.0);
        assert_eq!(
            pair[1].difference_from_previous,
            pair[1].total_paid - pair[0].total_paid
        );
    }
}

#[test]
fn test_comparison_is_idempotent() {
    let params = LoanParameters::default();
    let a = compute_comparison(params.principal, params.term_months, &params.apr_rates);
    let b = compute_comparison(params.principal, params.term_months, &params.apr_rates);
    assert_eq!(a, b);
}

// ===========================================================================
// Validation
// ===========================================================================

fn rejected_field(params: &LoanParameters) -> String {
    match validate_parameters(params) {
        Err(LoanError::InvalidInput { field, .. }) => field,
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_non_finite_principal_rejected() {
    for principal in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let params = LoanParameters {
            principal,
            ..LoanParameters::default()
        };
        assert_eq!(rejected_field(&params), "principal");
    }
}

#[test]
fn test_non_finite_apr_rejected() {
    for bad in [f64::NAN, f64::INFINITY] {
        let params = LoanParameters {
            apr_rates: vec![0.0, 1.0, bad],
            ..LoanParameters::default()
        };
        assert_eq!(rejected_field(&params), "apr_rates[2]");
    }
}

// ===========================================================================
// Presentation
// ===========================================================================

#[test]
fn test_tone_band_edges() {
    // The band is inclusive on both sides
    assert_eq!(DeltaTone::classify(-0.01), DeltaTone::Neutral);
    assert_eq!(DeltaTone::classify(0.01), DeltaTone::Neutral);
    assert_eq!(DeltaTone::classify(-0.010001), DeltaTone::Favorable);
    assert_eq!(DeltaTone::classify(0.010001), DeltaTone::Costlier);
}

#[test]
fn test_percentage_decimals_are_clamped() {
    assert_eq!(
        format_percentage(1.5, 40),
        format_percentage(1.5, MAX_PERCENT_DECIMALS)
    );
    assert_eq!(format_percentage(1.5, 40), "1.5000000000%");
}

#[test]
fn test_difference_sentinel_conflation() {
    assert_eq!(format_difference(0.0, 0.0), "-");
    assert_eq!(format_difference(0.0, 2.0), format_currency(0.0));
    assert_eq!(format_difference(0.0, 2.0), "$0.00");
}

#[test]
fn test_detailed_view_reference_rows() {
    let rows = compute_comparison(40_000.0, 60, &default_sweep());
    let view = build_detailed_view(&rows, 40_000.0);

    assert_eq!(view.len(), rows.len());
    assert_eq!(view[0].apr, "0.00%");
    assert_eq!(view[0].monthly_payment, "$666.67");
    assert_eq!(view[0].total_interest, "$0.00");
    assert_eq!(view[0].total_paid, "$40,000.00");
    assert_eq!(view[0].interest_pct_of_principal, "0.00%");
    assert_eq!(view[0].difference, "-");

    let r20 = &view[4];
    assert_eq!(r20.apr_value, 2.0);
    assert_eq!(r20.monthly_payment, "$701.11");
    assert_eq!(r20.total_interest, "$2,066.62");
    assert_eq!(r20.total_paid, "$42,066.62");
    assert_eq!(r20.interest_pct_of_principal, "5.17%");
    assert_eq!(r20.difference, "$522.89");

    let last = view.last().unwrap();
    assert_eq!(last.total_interest, "$6,398.72");
}

#[test]
fn test_summary_text_reference_values() {
    let rows = compute_comparison(40_000.0, 60, &default_sweep());
    let text = build_summary_text(&rows, 40_000.0, 60);

    assert!(text.contains("$40,000.00"), "{text}");
    assert!(text.contains("60 months"), "{text}");
    // Min interest at 0%, max at 6%
    assert!(text.contains("$0.00 at 0.00% APR"), "{text}");
    assert!(text.contains("$6,398.72 at 6.00% APR"), "{text}");
    assert!(text.contains("$666.67 to $773.31"), "{text}");
    // Named comparison 1.5% vs 2.0%
    assert!(text.contains("$1,543.73"), "{text}");
    assert!(text.contains("$2,066.62"), "{text}");
    assert!(text.contains("$522.89"), "{text}");
}

#[test]
fn test_summary_statistics_match_rows() {
    let rows = compute_comparison(40_000.0, 60, &default_sweep());
    let stats = summarize(&rows, 40_000.0, 60, 1.5, 2.0);

    let max = stats.max_interest.unwrap();
    assert_eq!(max.apr, 6.0);
    assert_eq!(max.value, rows[12].total_interest);
    assert_eq!(stats.min_payment.unwrap().value, rows[0].monthly_payment);
    assert_eq!(stats.comparison.delta, Some(rows[4].total_paid - rows[3].total_paid));
}
