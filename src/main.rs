//! portscout command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use portscout::cli::Args;
use portscout::output;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args);
    debug!("arguments: {:?}", args);

    if let Err(e) = run(&args).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    args.execute().await.context("scan failed")
}

/// Initialize logging from `RUST_LOG`, or from the verbosity flags.
fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .with_filter(filter),
        )
        .init();
}
