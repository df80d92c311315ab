use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use s_calc::cli::{self, PeriodAmounts, interactive, ui};
use s_calc::core::config::AppConfig;
use s_calc::core::log::init_logging;
use s_calc::core::Converter;
use s_calc::providers::RateProvider;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    version,
    about,
    disable_help_flag = true,
    after_help = "Examples:\n  s-calc -h=20 EUR\n  s-calc -m=5000 -c=USD\n  s-calc  (interactive mode)",
    group(ArgGroup::new("amount").args(["hour", "day", "month", "year"]))
)]
struct Cli {
    /// Salary per hour
    #[arg(short = 'h', long, value_name = "AMOUNT")]
    hour: Option<f64>,

    /// Salary per day
    #[arg(short = 'd', long, value_name = "AMOUNT")]
    day: Option<f64>,

    /// Salary per month
    #[arg(short = 'm', long, value_name = "AMOUNT")]
    month: Option<f64>,

    /// Salary per year
    #[arg(short = 'y', long, value_name = "AMOUNT")]
    year: Option<f64>,

    /// Currency (PLN, EUR, USD, GBP) [default: EUR]
    #[arg(short, long)]
    currency: Option<String>,

    /// Currency, used when --currency is not given
    #[arg(value_name = "CURRENCY")]
    positional_currency: Option<String>,

    /// Show detailed rate information
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Path to optional configuration file
    #[arg(long)]
    config: Option<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn amounts(&self) -> PeriodAmounts {
        PeriodAmounts {
            hour: self.hour,
            day: self.day,
            month: self.month,
            year: self.year,
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    // Input is validated before any cache or network access.
    let input = match cli::input_from_flags(
        &args.amounts(),
        args.currency.as_deref(),
        args.positional_currency.as_deref(),
    )? {
        Some(input) => input,
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            interactive::prompt_input(&mut stdin.lock(), &mut stdout)?
        }
    };

    let config = AppConfig::load(args.config.as_deref())?;
    let provider = RateProvider::from_config(&config)
        .context("Failed to initialize exchange rate provider")?;
    let converter = Converter::new(config.schedule);

    let spinner = ui::new_spinner("Fetching exchange rates...");
    let calculation = s_calc::calculate(input, &provider, &converter).await;
    spinner.finish_and_clear();
    let calculation = calculation.context("Failed to fetch exchange rates")?;

    print!(
        "{}",
        ui::render_table(&calculation.input, &calculation.result, &calculation.info)
    );
    if args.verbose {
        print!(
            "{}",
            ui::render_rate_details(&calculation.info, &calculation.rates)
        );
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();

    init_logging(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
