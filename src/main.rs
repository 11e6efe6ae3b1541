//! Best City CLI - Find the best city for a vacation
//!
//! Fetches hourly forecasts for a set of cities, scores each city by daytime
//! temperature and hours without precipitation, writes the ranking to a JSON
//! file and prints the winner.

use std::future;
use std::process::ExitCode;

use clap::Parser;

use bestcity::cli::{Cli, RunConfig, SourceConfig};
use bestcity::conditions::{load_conditions, ConditionSet};
use bestcity::data::{DirectorySource, ForecastClient, ForecastSource};
use bestcity::pipeline::{Pipeline, PipelineError, RunReport};
use bestcity::report::{best_cities, rename, summary_line, Labels, ResultWriter};

/// Installs the stderr log subscriber
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves when the user presses Ctrl-C
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the run is never interrupted
        future::pending::<()>().await;
    }
    tracing::warn!("interrupted, ranking the cities completed so far");
}

/// Runs the pipeline over the given forecast source
async fn analyze<S: ForecastSource>(
    source: S,
    conditions: ConditionSet,
    config: &RunConfig,
) -> Result<RunReport, PipelineError> {
    Pipeline::new(source, conditions, config.filter)
        .with_workers(config.workers)
        .run_until(&config.cities, interrupted())
        .await
}

async fn run(config: RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conditions = load_conditions(config.conditions.as_deref())?;

    let report = match &config.source {
        SourceConfig::Directory(dir) => {
            analyze(DirectorySource::new(dir.clone()), conditions, &config).await?
        }
        SourceConfig::Http { base_url } => {
            let mut client = ForecastClient::new();
            if let Some(url) = base_url {
                client = client.with_base_url(url.clone());
            }
            analyze(client, conditions, &config).await?
        }
    };

    if !report.failures.is_empty() {
        tracing::warn!(
            failed = report.failures.len(),
            requested = config.cities.len(),
            "some cities could not be ranked"
        );
    }

    let labels = Labels::for_locale(config.locale);
    let writer = ResultWriter::new(config.output.clone());
    writer.write(&rename(&report.results.to_json()?, &labels))?;

    let best = best_cities(&writer.read()?, &labels);
    println!("{}", summary_line(&best));

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    setup_logging(config.verbose);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
