mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::{CompareArgs, SummaryArgs};
use commands::report::ReportArgs;

/// Car-loan payment comparisons across a sweep of APRs
#[derive(Parser)]
#[command(
    name = "carloan",
    version,
    about = "Car-loan payment comparisons across a sweep of APRs",
    long_about = "Compute monthly payment, total paid and total interest for one loan \
                  amount and term at every APR in a sweep, with the extra cost of each \
                  step up in rate. Produces tables, summaries and a paginated report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format [default: json for data commands, table for report]
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare payments and totals across an APR sweep
    Compare(CompareArgs),
    /// Summary statistics for an APR sweep
    Summary(SummaryArgs),
    /// Write a paginated comparison report and echo its summary
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

impl Cli {
    /// `--output` if given; otherwise table for the report and JSON for data commands.
    fn output_format(&self) -> OutputFormat {
        match (&self.output, &self.command) {
            (Some(format), _) => format.clone(),
            (None, Commands::Report(_)) => OutputFormat::Table,
            (None, _) => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let format = cli.output_format();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Summary(args) => commands::compare::run_summary(args),
        Commands::Report(args) => commands::report::run_report(args),
        Commands::Version => {
            println!("carloan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
