use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fintrack_core::{Deductions, GstSupply, MarginalReliefMethod, TaxCalculator, TaxRegime};
use fintrack_ledger::GstOptions;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::ExportFormat;
use config::{AppConfig, DEFAULT_CONFIG_FILE};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian personal finance toolkit: rupee formatting, income tax and
/// expense reports.
#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./fintrack.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset, e.g. `debug`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Marginal relief estimate: `proportional` or `exact`.
    #[arg(long, global = true)]
    marginal_relief: Option<MarginalReliefMethod>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format an amount as Indian rupees.
    Format {
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
    },

    /// Parse a rupee string such as "₹1,00,000.00".
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Check that a string is a well-formed rupee amount.
    Validate {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Short lakh/crore form of an amount.
    Compact {
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
    },

    /// Indian fiscal year (April to March) for a date, today by default.
    FiscalYear {
        /// Date as YYYY-MM-DD.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Income tax breakdown for one regime.
    Tax {
        /// Gross annual income.
        #[arg(long)]
        income: Decimal,

        /// `new` or `old`.
        #[arg(long, default_value = "new")]
        regime: TaxRegime,

        #[command(flatten)]
        deductions: DeductionArgs,
    },

    /// Compare both regimes and recommend the cheaper one.
    Compare {
        #[arg(long)]
        income: Decimal,

        #[command(flatten)]
        deductions: DeductionArgs,
    },

    /// Expense summary of a CSV statement.
    Report {
        /// CSV with date,description,amount[,category] columns.
        #[arg(short, long)]
        file: PathBuf,

        /// Restrict to one month, as YYYY-MM.
        #[arg(long)]
        month: Option<String>,

        /// Add GST to the totals.
        #[arg(long, default_value_t = false)]
        gst: bool,

        /// Charge IGST instead of CGST + SGST.
        #[arg(long, default_value_t = false, requires = "gst")]
        inter_state: bool,

        /// Also show GST on each category subtotal.
        #[arg(long, default_value_t = false, requires = "gst")]
        per_category: bool,
    },

    /// Export a CSV statement as CSV or JSON.
    Export {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, value_enum)]
        format: ExportFormat,

        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
struct DeductionArgs {
    /// Section 80C investments (capped at ₹1,50,000).
    #[arg(long = "section-80c", default_value = "0")]
    section_80c: Decimal,

    /// Section 80D health insurance (capped at ₹25,000).
    #[arg(long = "section-80d", default_value = "0")]
    section_80d: Decimal,
}

impl From<&DeductionArgs> for Deductions {
    fn from(args: &DeductionArgs) -> Self {
        Deductions::new(args.section_80c, args.section_80d)
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `level`, then `info`.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let loaded = AppConfig::load(&config_path)?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));
    if found {
        debug!(path = %config_path.display(), "config loaded");
    } else {
        debug!(path = %config_path.display(), "no config file; using defaults");
    }

    let output = run(cli, &config)?;
    println!("{output}");
    Ok(())
}

fn run(
    cli: Cli,
    config: &AppConfig,
) -> Result<String> {
    let relief = cli.marginal_relief.unwrap_or(config.tax.marginal_relief);
    let calculator = TaxCalculator::with_marginal_relief(relief);

    match cli.command {
        Command::Format { amount } => Ok(commands::format_amount(amount)),
        Command::Parse { text } => commands::parse_amount(&text),
        Command::Validate { text } => Ok(commands::validate(&text)),
        Command::Compact { amount } => Ok(commands::compact(amount)),
        Command::FiscalYear { date } => {
            Ok(commands::fiscal_year_of(date, Local::now().date_naive()))
        }
        Command::Tax {
            income,
            regime,
            deductions,
        } => commands::tax(&calculator, income, regime, &Deductions::from(&deductions)),
        Command::Compare { income, deductions } => {
            commands::compare(&calculator, income, &Deductions::from(&deductions))
        }
        Command::Report {
            file,
            month,
            gst,
            inter_state,
            per_category,
        } => {
            let transactions = commands::load_statement(&file)?;
            let month = month.as_deref().map(commands::parse_month).transpose()?;
            let gst = gst.then(|| GstOptions {
                supply: if inter_state {
                    GstSupply::InterState
                } else {
                    config.gst.supply
                },
                per_category,
            });
            commands::report(&transactions, month, gst)
        }
        Command::Export {
            file,
            format,
            output,
        } => {
            let transactions = commands::load_statement(&file)?;
            commands::export(
                &transactions,
                format,
                &config.export,
                output.as_deref(),
                Local::now().naive_local(),
            )
        }
    }
}
