use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use leadbot::config::AppConfig;
use leadbot::services::ai::huggingface::{HttpEntityTagger, HttpStatusClassifier};
use leadbot::services::ai::{EntityTagger, StatusClassifier};
use leadbot::services::pipeline::Pipeline;
use leadbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let tagger: Option<Arc<dyn EntityTagger>> = match &config.ner_url {
        Some(url) => {
            tracing::info!("using NER endpoint (url: {url})");
            Some(Arc::new(HttpEntityTagger::new(url.clone(), config.inference_api_token.clone())))
        }
        None => {
            tracing::warn!("NER_URL not set, names and cities use anchor phrases only");
            None
        }
    };
    let classifier: Option<Arc<dyn StatusClassifier>> = match &config.zero_shot_url {
        Some(url) => {
            tracing::info!("using zero-shot endpoint (url: {url})");
            Some(Arc::new(HttpStatusClassifier::new(url.clone(), config.inference_api_token.clone())))
        }
        None => {
            tracing::warn!("ZERO_SHOT_URL not set, lead status will not be extracted");
            None
        }
    };

    let pipeline = Pipeline::from_config(&config, tagger, classifier)?;
    tracing::info!(
        region = %config.phone_region,
        k = config.knn_k,
        crm_base_path = %config.crm_base_path,
        "pipeline ready"
    );

    let state = Arc::new(AppState { pipeline });
    let app = leadbot::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
