use anyhow::Result;
use clap::Parser;

mod constants;
mod http;
mod logging;
mod output;
mod probe;
mod processor;
mod types;
mod utils;

use processor::{process_batch, process_single};
use types::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Command::Check { url, probe, output } => process_single(url, probe, output).await,
        Command::Batch {
            path,
            full_urls,
            concurrency,
            probe,
            output,
        } => process_batch(path, *full_urls, *concurrency, probe, output).await,
    }
}
