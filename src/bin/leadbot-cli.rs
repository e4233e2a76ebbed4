//! leadbot-cli: run one transcript through the pipeline without the HTTP server.
//!
//! Exits non-zero for error envelopes and for missing required fields.
//!
//! Usage:
//!   leadbot-cli --json '{"transcript": "Schedule a visit for lead 7b1b8f54 at 3 pm tomorrow."}'
//!   echo '{"transcript": "Can you help me?"}' | leadbot-cli
//!   leadbot-cli --scores --json '{"transcript": "Add lead Rohan, phone 9876543210"}'

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use leadbot::config::AppConfig;
use leadbot::errors::AppError;
use leadbot::models::BotRequest;
use leadbot::services::ai::huggingface::{HttpEntityTagger, HttpStatusClassifier};
use leadbot::services::ai::{EntityTagger, StatusClassifier};
use leadbot::services::pipeline::Pipeline;

/// Classify a transcript and extract CRM entities.
#[derive(Parser)]
#[command(name = "leadbot-cli")]
struct Args {
    /// Request body as JSON. Read from stdin when omitted.
    #[arg(long)]
    json: Option<String>,

    /// Print the per-signal score breakdown instead of the response.
    #[arg(long)]
    scores: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env();

    let raw = match args.json {
        Some(json) => json,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    let tagger = config.ner_url.clone().map(|url| {
        Arc::new(HttpEntityTagger::new(url, config.inference_api_token.clone())) as Arc<dyn EntityTagger>
    });
    let classifier = config.zero_shot_url.clone().map(|url| {
        Arc::new(HttpStatusClassifier::new(url, config.inference_api_token.clone()))
            as Arc<dyn StatusClassifier>
    });
    let pipeline = Pipeline::from_config(&config, tagger, classifier)?;

    let outcome = match serde_json::from_str::<BotRequest>(&raw) {
        Ok(request) if args.scores => pipeline
            .score(request.transcript.trim())
            .and_then(|breakdown| to_json(&breakdown))
            .map(|json| (json, true)),
        Ok(request) => {
            let now = chrono::Local::now().naive_local();
            match pipeline.process(&request, now).await {
                Ok(response) => to_json(&response).map(|json| (json, response.is_processed())),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(AppError::Validation(format!("invalid request JSON: {e}"))),
    };

    match outcome {
        Ok((json, true)) => {
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Ok((json, false)) => {
            println!("{json}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            tracing::warn!(kind = ?e.kind(), error = %e, "request failed");
            println!("{}", to_json(&e.envelope()).unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Parsing(format!("failed to serialize output: {e}")))
}
