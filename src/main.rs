use anyhow::Context;
use clap::Parser;
use weather_yield_api::cli::{init_logging, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    run(cli).await.context("weather-yield-api failed")
}
