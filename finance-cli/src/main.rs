use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use finance_core::calculations::AmortizationConfig;
use finance_core::format::parse_decimal;
use finance_core::models::{default_cars, default_reviews};
use finance_core::wizard::{VariantKind, Wizard};
use finance_data::{load_cars_from_file, load_reviews_from_file};
use rust_decimal::Decimal;
use tracing::{debug, info};

use finance_cli::answers::Answers;
use finance_cli::commands::{ApplyOutcome, ConsoleHandler, run_apply, run_quote, run_showcase};
use finance_cli::config::load_config;
use finance_cli::logging::init_logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Car finance quotes and applications from the terminal.
#[derive(Debug, Parser)]
#[command(name = "car-finance", version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `finance_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the monthly payment for a loan.
    Quote {
        /// Vehicle price or loan amount, e.g. `10000` or `£10,000`.
        #[arg(long, value_parser = parse_money)]
        amount: Decimal,

        #[arg(long, value_parser = parse_money, default_value = "0")]
        deposit: Decimal,

        /// Term in months.
        #[arg(long, default_value_t = 48)]
        term: u32,

        /// Representative APR in percent. Defaults to the configured form's.
        #[arg(long, value_parser = parse_money)]
        apr: Option<Decimal>,
    },

    /// Fill in the application form from an answers file and submit it.
    Apply {
        /// Answers file (TOML) with [loan], [personal] and [employment] tables.
        #[arg(long)]
        answers: PathBuf,

        /// Form to fill in: `application` or `quick-quote`.
        #[arg(long, value_parser = parse_variant)]
        variant: Option<VariantKind>,
    },

    /// Run the vehicle and review carousels under autoplay.
    Showcase {
        /// Vehicle catalogue (CSV). The built-in list is used when omitted.
        #[arg(long)]
        cars: Option<PathBuf>,

        /// Review catalogue (CSV). The built-in list is used when omitted.
        #[arg(long)]
        reviews: Option<PathBuf>,

        /// Viewport width in pixels.
        #[arg(long, default_value_t = 1280)]
        width: u32,

        /// Number of autoplay periods to run for.
        #[arg(long, default_value_t = 5)]
        ticks: u32,
    },
}

fn parse_money(s: &str) -> Result<Decimal, String> {
    parse_decimal(s).map_err(|e| e.to_string())
}

fn parse_variant(s: &str) -> Result<VariantKind, String> {
    VariantKind::parse(s)
        .ok_or_else(|| format!("unknown form '{s}', expected application or quick-quote"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    let config = load_config(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Quote {
            amount,
            deposit,
            term,
            apr,
        } => {
            let apr = apr.unwrap_or(config.wizard_variant(None).amortization.apr);
            run_quote(AmortizationConfig { apr }, amount, deposit, term, &mut stdout)?;
        }

        Command::Apply { answers, variant } => {
            let answers = Answers::load(&answers)?;
            let mut wizard = Wizard::new(config.wizard_variant(variant), config.personal_rules());
            debug!(variant = wizard.variant().kind.as_str(), "starting application");

            let mut handler = ConsoleHandler::new(io::stdout());
            match run_apply(&mut wizard, &answers, &mut handler, &mut stdout)? {
                ApplyOutcome::Submitted(_) => info!("application complete"),
                ApplyOutcome::Refused { step, errors } => {
                    bail!("{step} was refused with {} error(s)", errors.len())
                }
                ApplyOutcome::Unquotable(err) => {
                    return Err(err).context("the loan could not be quoted");
                }
            }
        }

        Command::Showcase {
            cars,
            reviews,
            width,
            ticks,
        } => {
            let cars = match cars {
                Some(path) => load_cars_from_file(&path)
                    .with_context(|| format!("Failed to load cars: {}", path.display()))?,
                None => default_cars(),
            };
            let reviews = match reviews {
                Some(path) => load_reviews_from_file(&path)
                    .with_context(|| format!("Failed to load reviews: {}", path.display()))?,
                None => default_reviews(),
            };

            run_showcase(
                cars,
                reviews,
                config.breakpoints(),
                config.autoplay_interval(),
                width,
                ticks,
                &mut stdout,
            )
            .await?;
        }
    }

    Ok(())
}
