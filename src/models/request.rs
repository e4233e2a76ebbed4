use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotRequest {
    pub transcript: String,
    #[serde(default)]
    pub metadata: Option<RequestMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestMetadata {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BotRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            metadata: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.metadata = Some(RequestMetadata {
            user_id: Some(user_id.into()),
            ..Default::default()
        });
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.user_id.as_deref())
    }
}
