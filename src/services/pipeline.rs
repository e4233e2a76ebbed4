use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{
    BotRequest, BotResponse, BusinessIntent, CrmCall, LeadStatus, ResponsePayload, ResultMessage,
};
use crate::services::ai::{EntityTagger, StatusClassifier};
use crate::services::crm::CrmRouter;
use crate::services::extraction::phone::RegionPhoneMatcher;
use crate::services::extraction::EntityExtractor;
use crate::services::scoring::pattern::{RegexSettings, RegexSignalScorer};
use crate::services::scoring::{IntentScorer, ScoreBreakdown};
use crate::services::validation;

const UNKNOWN_MESSAGE: &str = "Intent could not be identified. No CRM action taken.";

/// Transcript to response: score, resolve, extract, route, validate.
pub struct Pipeline {
    scorer: IntentScorer,
    extractor: EntityExtractor,
    crm: CrmRouter,
}

impl Pipeline {
    pub fn new(scorer: IntentScorer, extractor: EntityExtractor, crm: CrmRouter) -> Self {
        Self {
            scorer,
            extractor,
            crm,
        }
    }

    /// Default local collaborators plus whichever model collaborators the
    /// caller could construct.
    pub fn from_config(
        config: &AppConfig,
        tagger: Option<Arc<dyn EntityTagger>>,
        classifier: Option<Arc<dyn StatusClassifier>>,
    ) -> anyhow::Result<Self> {
        let regex = RegexSignalScorer::new(RegexSettings {
            per_match_score: config.regex_match_score,
            max_per_intent: Some(config.regex_max_per_intent).filter(|cap| *cap > 0.0),
            overlapping: config.regex_overlapping,
        });
        let scorer = IntentScorer::with_default_embedder(regex, config.knn_k)?;
        let phone = RegionPhoneMatcher::new(&config.phone_region)?;
        let extractor = EntityExtractor::new(Arc::new(phone), tagger, classifier);

        Ok(Self::new(scorer, extractor, CrmRouter::new(config.crm_base_path.clone())))
    }

    pub fn score(&self, transcript: &str) -> Result<ScoreBreakdown, AppError> {
        self.scorer
            .score(transcript)
            .map_err(|e| AppError::Parsing(format!("intent scoring failed: {e:#}")))
    }

    pub async fn process(&self, request: &BotRequest, now: NaiveDateTime) -> Result<BotResponse, AppError> {
        let transcript = request.transcript.trim();
        if transcript.is_empty() {
            return Err(AppError::Validation("transcript must be a non-empty string".to_string()));
        }

        let breakdown = self.score(transcript)?;
        let intent = breakdown.intent();
        let (top_label, top_score) = breakdown.combined.top();
        tracing::info!(intent = %intent, top_label = top_label.as_str(), top_score, "intent resolved");

        let mut entities = self.extractor.extract(transcript, now).await;
        if intent == BusinessIntent::LeadCreate {
            entities.status = Some(LeadStatus::New);
        }

        if intent == BusinessIntent::Unknown {
            return Ok(BotResponse::Processed(ResponsePayload {
                intent,
                entities,
                crm_call: CrmCall::none(),
                result: ResultMessage {
                    message: UNKNOWN_MESSAGE.to_string(),
                },
            }));
        }

        let crm_call = self.crm.resolve(intent)?;

        if let Some(failure) = validation::validate(intent, &entities) {
            return Ok(BotResponse::Invalid(failure));
        }

        let user = request.user_id().unwrap_or("anonymous");
        Ok(BotResponse::Processed(ResponsePayload {
            intent,
            entities,
            crm_call,
            result: ResultMessage {
                message: format!("Successfully processed intent '{intent}' for user {user}."),
            },
        }))
    }
}
