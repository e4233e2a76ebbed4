use std::sync::LazyLock;

use regex::Regex;

use crate::models::FieldResult;
use crate::services::ai::{EntityTagger, TaggedEntity};

static RE_NAME_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:name|lead)\s*(?:is|:)?\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\b").unwrap()
});

static RE_ADD_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    // Capitalisation is only enforced on the name itself.
    Regex::new(r"\b(?i:add)(?i: a| new)?(?i: lead| contact)?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\b")
        .unwrap()
});

static RE_PLACE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:from|in|at|within|to)\s+([A-Z][a-zA-Z\-]+(?:\s+[A-Z][a-zA-Z\-]+)?)\b").unwrap()
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPlace {
    pub name: Option<String>,
    pub city: Option<String>,
}

/// Tagger first; anchor phrases fill whatever the tagger left empty.
pub async fn extract_name_city(tagger: Option<&dyn EntityTagger>, text: &str) -> PersonPlace {
    let tagged = match tagger {
        Some(tagger) => match tagger.tag(text).await {
            Ok(entities) => FieldResult::Found(merge_tagged(&entities)),
            Err(e) => FieldResult::Failed(e.to_string()),
        },
        None => FieldResult::Absent,
    };

    let mut found = match tagged {
        FieldResult::Found(found) => found,
        FieldResult::Absent => PersonPlace::default(),
        FieldResult::Failed(reason) => {
            tracing::warn!(error = %reason, "entity tagging failed, using anchor phrases");
            PersonPlace::default()
        }
    };

    if found.name.is_none() {
        found.name = anchored_name(text);
    }
    if found.city.is_none() {
        found.city = anchored_place(text);
    }
    found
}

/// Joins tagged words per entity kind, in tagger order.
pub fn merge_tagged(entities: &[TaggedEntity]) -> PersonPlace {
    let mut out = PersonPlace::default();
    for entity in entities {
        let label = entity.entity_group.trim().to_uppercase();
        let label = label
            .strip_prefix("B-")
            .or_else(|| label.strip_prefix("I-"))
            .unwrap_or(&label);
        let word = entity.word.trim().trim_matches([',', '.']);
        if word.is_empty() {
            continue;
        }

        let slot = match label {
            "PER" | "PERSON" => &mut out.name,
            "LOC" | "GPE" | "CITY" | "LOCATION" => &mut out.city,
            _ => continue,
        };
        *slot = Some(match slot.take() {
            Some(prev) => format!("{prev} {word}"),
            None => word.to_string(),
        });
    }
    out
}

fn anchored_name(text: &str) -> Option<String> {
    RE_NAME_ANCHOR
        .captures(text)
        .or_else(|| RE_ADD_ANCHOR.captures(text))
        .map(|caps| caps[1].to_string())
}

fn anchored_place(text: &str) -> Option<String> {
    RE_PLACE_ANCHOR.captures(text).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Tags(Vec<(&'static str, &'static str)>);

    #[async_trait]
    impl EntityTagger for Tags {
        async fn tag(&self, _text: &str) -> anyhow::Result<Vec<TaggedEntity>> {
            Ok(self
                .0
                .iter()
                .map(|(group, word)| TaggedEntity {
                    entity_group: group.to_string(),
                    word: word.to_string(),
                    score: 0.99,
                })
                .collect())
        }
    }

    struct Broken;

    #[async_trait]
    impl EntityTagger for Broken {
        async fn tag(&self, _text: &str) -> anyhow::Result<Vec<TaggedEntity>> {
            anyhow::bail!("tagger offline")
        }
    }

    #[tokio::test]
    async fn test_anchor_fallback_without_tagger() {
        let found = extract_name_city(
            None,
            "Add a new lead: Rohan Sharma from Gurgaon, phone 9876543210, source Instagram.",
        )
        .await;
        assert_eq!(found.name.as_deref(), Some("Rohan Sharma"));
        assert_eq!(found.city.as_deref(), Some("Gurgaon"));
    }

    #[tokio::test]
    async fn test_name_is_anchor() {
        let found = extract_name_city(None, "Create lead name Priya Nair, city Mumbai").await;
        assert_eq!(found.name.as_deref(), Some("Priya Nair"));
    }

    #[tokio::test]
    async fn test_add_anchor_ignores_verb_case() {
        let found = extract_name_city(None, "ADD Sneha Kapoor in Delhi").await;
        assert_eq!(found.name.as_deref(), Some("Sneha Kapoor"));
        assert_eq!(found.city.as_deref(), Some("Delhi"));
    }

    #[tokio::test]
    async fn test_tagger_words_concatenate() {
        let tagger = Tags(vec![("PER", "Aarav"), ("PER", "Mehta,"), ("LOC", "Pune")]);
        let found = extract_name_city(Some(&tagger), "whatever").await;
        assert_eq!(found.name.as_deref(), Some("Aarav Mehta"));
        assert_eq!(found.city.as_deref(), Some("Pune"));
    }

    #[tokio::test]
    async fn test_tagger_miss_falls_back_per_field() {
        let tagger = Tags(vec![("PER", "Rohan")]);
        let found = extract_name_city(Some(&tagger), "lead from Gurgaon").await;
        assert_eq!(found.name.as_deref(), Some("Rohan"));
        assert_eq!(found.city.as_deref(), Some("Gurgaon"));
    }

    #[tokio::test]
    async fn test_tagger_failure_falls_back() {
        let found = extract_name_city(Some(&Broken), "name is Priya Nair").await;
        assert_eq!(found.name.as_deref(), Some("Priya Nair"));
    }

    #[tokio::test]
    async fn test_nothing_found() {
        assert_eq!(extract_name_city(None, "Can you help me?").await, PersonPlace::default());
    }
}
