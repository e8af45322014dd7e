use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use car_loan_core::analysis::{self, ComparisonInput};
use car_loan_core::params::{
    apr_sweep, LoanParameters, DEFAULT_APR_STEP, DEFAULT_MAX_APR, DEFAULT_MIN_APR,
    DEFAULT_PRINCIPAL, DEFAULT_TERM_MONTHS,
};
use car_loan_core::presentation::{sort_display_rows, BaselineMarker};

use crate::input;

/// Placement of the "-" marker in the difference column
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BaselineArg {
    /// Only on a 0% APR row with no difference
    ZeroRate,
    /// On the first row of the sweep
    FirstRow,
}

impl From<BaselineArg> for BaselineMarker {
    fn from(arg: BaselineArg) -> Self {
        match arg {
            BaselineArg::ZeroRate => BaselineMarker::ZeroRate,
            BaselineArg::FirstRow => BaselineMarker::FirstRow,
        }
    }
}

/// Loan parameters shared by every command
#[derive(Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<f64>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Explicit ascending APRs in percent, e.g. 0,1.5,2 (overrides the sweep flags)
    #[arg(long, value_delimiter = ',')]
    pub rates: Option<Vec<f64>>,

    /// First APR of the sweep in percent
    #[arg(long)]
    pub min_apr: Option<f64>,

    /// Last APR of the sweep in percent
    #[arg(long)]
    pub max_apr: Option<f64>,

    /// Sweep step in percentage points
    #[arg(long)]
    pub step: Option<f64>,

    /// Lower APR of the named two-point comparison
    #[arg(long)]
    pub compare_from: Option<f64>,

    /// Higher APR of the named two-point comparison
    #[arg(long)]
    pub compare_to: Option<f64>,

    /// Where to show the "-" baseline marker
    #[arg(long, value_enum)]
    pub baseline: Option<BaselineArg>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// List the highest APR first
    #[arg(long)]
    pub descending: bool,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// File, then stdin, then flags with defaults.
pub fn resolve_input(args: &LoanArgs) -> Result<ComparisonInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_config(path);
    }
    if let Some(piped) = input::stdin::read_stdin::<ComparisonInput>()? {
        return Ok(piped);
    }

    let apr_rates = match args.rates {
        Some(ref rates) => rates.clone(),
        None => apr_sweep(
            args.min_apr.unwrap_or(DEFAULT_MIN_APR),
            args.max_apr.unwrap_or(DEFAULT_MAX_APR),
            args.step.unwrap_or(DEFAULT_APR_STEP),
        )?,
    };

    Ok(ComparisonInput {
        params: LoanParameters {
            principal: args.principal.unwrap_or(DEFAULT_PRINCIPAL),
            term_months: args.term.unwrap_or(DEFAULT_TERM_MONTHS),
            apr_rates,
        },
        compare_from: args.compare_from,
        compare_to: args.compare_to,
        baseline: args.baseline.map(Into::into).unwrap_or_default(),
    })
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input = resolve_input(&args.loan)?;
    let output = analysis::analyze_comparison(&comparison_input)?;

    let mut rows = output.result.display_rows;
    if args.descending {
        sort_display_rows(&mut rows, true);
    }

    Ok(json!({
        "result": rows,
        "methodology": output.methodology,
        "warnings": output.warnings,
        "metadata": output.metadata,
    }))
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input = resolve_input(&args.loan)?;
    let output = analysis::analyze_comparison(&comparison_input)?;

    Ok(json!({
        "result": {
            "summary_text": output.result.summary_text,
            "statistics": output.result.summary,
        },
        "methodology": output.methodology,
        "warnings": output.warnings,
        "metadata": output.metadata,
    }))
}
