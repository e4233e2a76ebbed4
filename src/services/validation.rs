use crate::models::{
    BusinessIntent, EntityBag, ErrorKind, ValidationDetails, ValidationErrorBody,
    ValidationFailure,
};

const PHONE_HINT: &str = "Phone number missing or invalid (include +91 or 10 digits).";
const NAME_CITY_HINT: &str = "Missing or incomplete data for field 'name/city'.";
const VISIT_HINT: &str = "Visit datetime missing or invalid (expected ISO, future date).";
const STATUS_HINT: &str = "Missing or invalid status (use NEW, IN_PROGRESS, FOLLOW_UP, WON, or LOST).";

/// Required-field check for a resolved intent. Returns the first failure
/// only; `None` means the entities satisfy the intent.
pub fn validate(intent: BusinessIntent, entities: &EntityBag) -> Option<ValidationFailure> {
    let missing = match intent {
        BusinessIntent::LeadCreate => {
            if is_blank(&entities.phone) {
                Some(("phone", "phone_incomplete", PHONE_HINT))
            } else if is_blank(&entities.name) || is_blank(&entities.city) {
                Some(("name/city", "data_incomplete", NAME_CITY_HINT))
            } else {
                None
            }
        }
        BusinessIntent::VisitSchedule if is_blank(&entities.visit_time) => {
            Some(("visit_time", "visit_date_incomplete", VISIT_HINT))
        }
        BusinessIntent::LeadUpdate if entities.status.is_none() => {
            Some(("status", "status_incomplete", STATUS_HINT))
        }
        _ => None,
    };

    let (field, reason, hint) = missing?;
    tracing::info!(intent = %intent, field, reason, "validation failed");
    Some(ValidationFailure {
        intent,
        error: ValidationErrorBody {
            kind: ErrorKind::ValidationError,
            details: ValidationDetails {
                field: field.to_string(),
                reason: reason.to_string(),
                hint: hint.to_string(),
            },
        },
    })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
