//! Field extractors. Each one is independent; a miss in one never affects
//! another.

pub mod datetime;
pub mod email;
pub mod identifier;
pub mod person;
pub mod phone;
pub mod source;
pub mod status;

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::models::EntityBag;
use crate::services::ai::{EntityTagger, StatusClassifier};
use phone::PhoneMatcher;

/// Runs every field extractor over a transcript. Model collaborators are
/// optional; without them the regex strategies are used alone.
pub struct EntityExtractor {
    tagger: Option<Arc<dyn EntityTagger>>,
    classifier: Option<Arc<dyn StatusClassifier>>,
    phone: Arc<dyn PhoneMatcher>,
}

impl EntityExtractor {
    pub fn new(
        phone: Arc<dyn PhoneMatcher>,
        tagger: Option<Arc<dyn EntityTagger>>,
        classifier: Option<Arc<dyn StatusClassifier>>,
    ) -> Self {
        Self {
            tagger,
            classifier,
            phone,
        }
    }

    pub async fn extract(&self, text: &str, now: NaiveDateTime) -> EntityBag {
        let matcher = self.phone.as_ref();

        let person = person::extract_name_city(self.tagger.as_deref(), text).await;
        let status = status::classify_status(self.classifier.as_deref(), text).await;

        let bag = EntityBag {
            name: person.name,
            city: person.city,
            phone: phone::extract_phone(matcher, text),
            email: email::extract_email(text),
            visit_time: datetime::extract_datetime(matcher, text, now).map(datetime::format_iso),
            lead_id: identifier::extract_lead_id(matcher, text),
            status: status::status_value(status),
            source: source::extract_source(text),
        };

        tracing::debug!(entities = ?bag, "extracted entities");
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeadSource, LeadStatus};
    use crate::services::ai::Classification;
    use async_trait::async_trait;
    use phone::RegionPhoneMatcher;

    struct InProgress;

    #[async_trait]
    impl StatusClassifier for InProgress {
        async fn classify(&self, _text: &str, labels: &[&str]) -> anyhow::Result<Classification> {
            assert!(labels.contains(&"IN_PROGRESS"));
            Ok(Classification {
                labels: vec!["IN_PROGRESS".into()],
                scores: vec![0.8],
            })
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-10-01 10:00", "%Y-%m-%d %H:%M").unwrap()
    }

    fn extractor(classifier: Option<Arc<dyn StatusClassifier>>) -> EntityExtractor {
        EntityExtractor::new(Arc::new(RegionPhoneMatcher::new("IN").unwrap()), None, classifier)
    }

    #[tokio::test]
    async fn test_lead_create_fields() {
        let bag = extractor(None)
            .extract(
                "Add a new lead: Rohan Sharma from Gurgaon, phone 9876543210, source Instagram.",
                now(),
            )
            .await;
        assert_eq!(bag.name.as_deref(), Some("Rohan Sharma"));
        assert_eq!(bag.city.as_deref(), Some("Gurgaon"));
        assert_eq!(bag.phone.as_deref(), Some("+919876543210"));
        assert_eq!(bag.source, Some(LeadSource::Instagram));
        assert_eq!(bag.lead_id, None);
        assert_eq!(bag.status, None);
    }

    #[tokio::test]
    async fn test_visit_fields() {
        let bag = extractor(None)
            .extract("Schedule a visit for lead 7b1b8f54 at 3 pm tomorrow.", now())
            .await;
        assert_eq!(bag.lead_id.as_deref(), Some("7b1b8f54"));
        assert_eq!(bag.visit_time.as_deref(), Some("2025-10-02T15:00:00"));
    }

    #[tokio::test]
    async fn test_status_from_classifier() {
        let bag = extractor(Some(Arc::new(InProgress)))
            .extract("Update lead 7b1b8f54 to in progress.", now())
            .await;
        assert_eq!(bag.status, Some(LeadStatus::InProgress));
        assert_eq!(bag.lead_id.as_deref(), Some("7b1b8f54"));
    }

    #[tokio::test]
    async fn test_email_extracted() {
        let bag = extractor(None)
            .extract("Create lead name Priya Nair, email priya.nair@example.com", now())
            .await;
        assert_eq!(bag.email.as_deref(), Some("priya.nair@example.com"));
    }
}
