use clap::Parser;
use dotenv::dotenv;
use log::{error, info};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use config::Config;
use error::PipelineError;
use intent::Intent;
use pipeline::Pipeline;
use response::MetricRequest;

mod auth;
mod config;
mod error;
mod intent;
mod pipeline;
mod response;
mod sensor;
#[cfg(test)]
mod stub;
mod telemetry;

/// Speaks the current readings of a Netatmo Healthy Home Coach.
#[derive(Parser, Debug)]
#[command(name = "homecoach")]
struct Cli {
    /// Read credentials from a voice-app style config.json instead of NETATMO_* variables
    #[arg(long)]
    config: Option<PathBuf>,

    /// temperature, humidity, pressure or co2 (an `Intent` suffix is accepted)
    intent: Option<String>,

    /// Temperature unit slot; only "Fahrenheit" changes anything
    #[arg(long)]
    unit: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let request = match intent::parse(cli.intent.as_deref(), cli.unit.as_deref()) {
        Intent::Launch => {
            println!("{}", intent::LAUNCH_PROMPT);
            return ExitCode::SUCCESS;
        }
        Intent::Metric(request) => request,
    };

    let result = tokio::select! {
        result = answer(cli.config.as_deref(), &request) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("cancelled");
            return ExitCode::FAILURE;
        }
    };

    let (sentence, answered) = reply(result);
    println!("{}", sentence);
    if answered {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn answer(
    config_path: Option<&Path>,
    request: &MetricRequest,
) -> Result<String, PipelineError> {
    let config = match config_path {
        Some(path) => Config::from_json_file(path)?,
        None => Config::from_env()?,
    };
    let pipeline = Pipeline::from_config(config)?;
    pipeline.get_metric_sentence(request).await
}

/// The spoken text and whether it carries the requested value.
fn reply(result: Result<String, PipelineError>) -> (String, bool) {
    match result {
        Ok(sentence) => (sentence, true),
        Err(e) => {
            error!("{} error: {}", e.category(), e);
            (String::from(intent::UNAVAILABLE), false)
        }
    }
}
