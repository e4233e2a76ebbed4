use crate::models::{FieldResult, LeadStatus};
use crate::services::ai::StatusClassifier;

/// Zero-shot status classification over the fixed lead status labels.
pub async fn classify_status(
    classifier: Option<&dyn StatusClassifier>,
    text: &str,
) -> FieldResult<LeadStatus> {
    if text.trim().is_empty() {
        return FieldResult::Absent;
    }
    let Some(classifier) = classifier else {
        return FieldResult::Absent;
    };

    let labels: Vec<&str> = LeadStatus::CANDIDATES.iter().map(|s| s.as_str()).collect();
    match classifier.classify(text, &labels).await {
        Ok(result) => match result.top() {
            Some((label, confidence)) => match LeadStatus::from_label(label) {
                Some(status) => {
                    tracing::debug!(status = status.as_str(), confidence, "classified lead status");
                    FieldResult::Found(status)
                }
                None => FieldResult::Failed(format!("unexpected status label: {label}")),
            },
            None => FieldResult::Failed("classifier returned no labels".to_string()),
        },
        Err(e) => FieldResult::Failed(e.to_string()),
    }
}

/// Collapses a classification outcome into the entity value. Failures become
/// the `UNKNOWN` sentinel.
pub fn status_value(result: FieldResult<LeadStatus>) -> Option<LeadStatus> {
    match result {
        FieldResult::Found(status) => Some(status),
        FieldResult::Absent => None,
        FieldResult::Failed(reason) => {
            tracing::warn!(error = %reason, "status classification failed");
            Some(LeadStatus::Unknown)
        }
    }
}
