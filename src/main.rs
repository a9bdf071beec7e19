use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::ddcutil::Ddcutil;
use crate::monitor::Monitor;

#[macro_use]
extern crate tracing;

mod cli;
mod ddcutil;
mod error;
mod monitor;
mod parse;

fn setup_logs(debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // stdout carries the JSON report, so log output goes to stderr
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let default_filter = if debug { "debug" } else { "info" };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(default_filter));

    if let Ok(journal_layer) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(journal_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    }
}

/// One entry of the detect report: a monitor, or in the same slot, the
/// failure its query produced.
#[derive(Serialize)]
#[serde(untagged)]
enum DetectOutcome {
    Monitor(Monitor),
    Failed { error: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logs(args.debug);
    debug!("run in debug mode");

    let runner = Ddcutil;
    match args.command {
        Command::Version => println!("{}", env!("CARGO_PKG_VERSION")),
        Command::Detect => {
            let outcomes = monitor::detect(&runner).await?;
            let report: Vec<DetectOutcome> = outcomes
                .into_iter()
                .map(|outcome| match outcome {
                    Ok(monitor) => DetectOutcome::Monitor(monitor),
                    Err(err) => {
                        error!("monitor skipped: {err}");
                        DetectOutcome::Failed {
                            error: err.to_string(),
                        }
                    }
                })
                .collect();
            println!("{}", serde_json::to_string(&report)?);
        }
        Command::SetBrightness { bus, brightness } => {
            monitor::set_brightness(&runner, bus, brightness)?;
        }
    }
    Ok(())
}
