use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{Classification, EntityTagger, StatusClassifier, TaggedEntity};

/// Token-classification endpoint speaking the Hugging Face inference shape.
pub struct HttpEntityTagger {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpEntityTagger {
    pub fn new(url: String, token: Option<String>) -> Self {
        Self {
            url,
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EntityTagger for HttpEntityTagger {
    async fn tag(&self, text: &str) -> anyhow::Result<Vec<TaggedEntity>> {
        let body = json!({
            "inputs": text,
            "parameters": { "aggregation_strategy": "simple" },
        });

        let data = post_json(&self.client, &self.url, self.token.as_deref(), &body)
            .await
            .context("failed to call NER endpoint")?;

        serde_json::from_value(data).context("unexpected NER response shape")
    }
}

/// Zero-shot classification endpoint speaking the Hugging Face inference shape.
pub struct HttpStatusClassifier {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpStatusClassifier {
    pub fn new(url: String, token: Option<String>) -> Self {
        Self {
            url,
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl StatusClassifier for HttpStatusClassifier {
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> anyhow::Result<Classification> {
        let body = json!({
            "inputs": text,
            "parameters": { "candidate_labels": candidate_labels },
        });

        let data = post_json(&self.client, &self.url, self.token.as_deref(), &body)
            .await
            .context("failed to call zero-shot endpoint")?;

        let classification: Classification =
            serde_json::from_value(data).context("unexpected zero-shot response shape")?;
        anyhow::ensure!(!classification.labels.is_empty(), "zero-shot response has no labels");
        Ok(classification)
    }
}

async fn post_json(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> anyhow::Result<serde_json::Value> {
    let mut request = client.post(url).json(body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let resp = request.send().await?;
    let status = resp.status();
    let data: serde_json::Value = resp.json().await.context("failed to parse response body")?;

    if !status.is_success() {
        anyhow::bail!("inference API error ({}): {}", status, data);
    }
    Ok(data)
}
