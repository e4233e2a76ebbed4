use crate::models::IntentLabel;

pub const ACTION_VERBS: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Adding,
        &[
            "add", "create", "register", "onboard", "enroll", "insert", "open", "save", "generate",
        ],
    ),
    (
        IntentLabel::Scheduling,
        &[
            "schedule", "book", "arrange", "plan", "meet", "visit", "go", "see", "fix",
        ],
    ),
    (
        IntentLabel::Updating,
        &[
            "update", "change", "modify", "mark", "edit", "convert", "revise", "check", "alter",
            "move",
        ],
    ),
];

pub const DOMAIN_KEYWORDS: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Adding,
        &[
            "name", "email", "phone", "number", "city", "location", "street", "new", "source",
            "instagram", "facebook", "linkedin", "signup", "form", "details",
        ],
    ),
    (
        IntentLabel::Scheduling,
        &[
            "calendar", "reminder", "set up", "meeting", "scheduling", "today", "tomorrow",
            "next week", "evening", "morning", "afternoon", "call", "demo", "tour", "inspection",
            "slot", "time", "day", "date",
        ],
    ),
    (
        IntentLabel::Updating,
        &[
            "won", "lost", "closed", "converted", "pending", "completed", "cancelled", "delete",
            "remove", "adjust", "remark", "comment", "feedback", "note", "notes", "details",
            "reopened", "archive",
        ],
    ),
];

/// Flattens a grouped table into `(phrase, label)` pairs in table order.
pub fn flatten(table: &[(IntentLabel, &[&'static str])]) -> Vec<(&'static str, IntentLabel)> {
    table
        .iter()
        .flat_map(|(label, phrases)| phrases.iter().map(move |p| (*p, *label)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_has_exemplars() {
        for table in [ACTION_VERBS, DOMAIN_KEYWORDS] {
            for label in IntentLabel::ALL {
                assert!(table.iter().any(|(l, p)| *l == label && !p.is_empty()));
            }
        }
    }

    #[test]
    fn test_flatten_keeps_order() {
        let flat = flatten(ACTION_VERBS);
        assert_eq!(flat[0], ("add", IntentLabel::Adding));
        assert_eq!(flat.last().unwrap().1, IntentLabel::Updating);
    }
}
