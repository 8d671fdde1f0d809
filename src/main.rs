use anyhow::Result;
use collectible_forecast::{BatchArgs, ForecastArgs, batch, forecast};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_YEARS: i32 = 3;
const MIN_YEARS: i32 = 1;
const MAX_YEARS: i32 = 5;
const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Forecast(ForecastArgs),
    Batch(BatchArgs),
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Years come from the request (or env) and are clamped here, at the boundary.
fn resolve_years(years: Option<i32>) -> i32 {
    years
        .or_else(|| env_parse("FORECAST_YEARS"))
        .unwrap_or(DEFAULT_YEARS)
        .clamp(MIN_YEARS, MAX_YEARS)
}

fn apply_forecast_defaults(args: &mut ForecastArgs) {
    args.years = Some(resolve_years(args.years));
    if args.seed.is_none() {
        args.seed = env_parse("FORECAST_SEED");
    }
}

fn apply_batch_defaults(args: &mut BatchArgs) {
    args.years = Some(resolve_years(args.years));
    if args.seed.is_none() {
        args.seed = env_parse("FORECAST_SEED");
    }
    if args.concurrency.is_none() {
        args.concurrency = Some(DEFAULT_CONCURRENCY);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Forecast(mut forecast_args) => {
            apply_forecast_defaults(&mut forecast_args);
            forecast::execute(&forecast_args)?;
        }
        Command::Batch(mut batch_args) => {
            apply_batch_defaults(&mut batch_args);
            batch::execute(&batch_args).await?;
        }
    }
    Ok(())
}
