use serde::{Deserialize, Serialize};

use super::{BusinessIntent, EntityBag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValidationError,
    ParsingError,
    CrmError,
}

/// Resolved descriptor of the downstream CRM call. Never invoked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmCall {
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub status_code: u16,
}

impl CrmCall {
    pub fn none() -> Self {
        Self {
            endpoint: None,
            method: None,
            status_code: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub intent: BusinessIntent,
    pub entities: EntityBag,
    pub crm_call: CrmCall,
    pub result: ResultMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetails {
    pub field: String,
    pub reason: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub details: ValidationDetails,
}

/// Post-extraction required-field failure for a resolved intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub intent: BusinessIntent,
    pub error: ValidationErrorBody,
}

impl ValidationFailure {
    pub fn reason(&self) -> &str {
        &self.error.details.reason
    }

    pub fn field(&self) -> &str {
        &self.error.details.field
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BotResponse {
    Processed(ResponsePayload),
    Invalid(ValidationFailure),
}

impl BotResponse {
    pub fn intent(&self) -> BusinessIntent {
        match self {
            BotResponse::Processed(payload) => payload.intent,
            BotResponse::Invalid(failure) => failure.intent,
        }
    }

    /// False when required fields were missing for the resolved intent.
    pub fn is_processed(&self) -> bool {
        matches!(self, BotResponse::Processed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub details: serde_json::Value,
}

/// Pipeline-level failure. The intent is always UNKNOWN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub intent: BusinessIntent,
    pub error: ErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_shape() {
        let failure = ValidationFailure {
            intent: BusinessIntent::LeadUpdate,
            error: ValidationErrorBody {
                kind: ErrorKind::ValidationError,
                details: ValidationDetails {
                    field: "status".into(),
                    reason: "status_incomplete".into(),
                    hint: "hint".into(),
                },
            },
        };
        let json = serde_json::to_value(BotResponse::Invalid(failure)).unwrap();
        assert_eq!(json["intent"], "LEAD_UPDATE");
        assert_eq!(json["error"]["type"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"]["reason"], "status_incomplete");
    }

    #[test]
    fn test_validation_failure_is_not_processed() {
        let failure = ValidationFailure {
            intent: BusinessIntent::VisitSchedule,
            error: ValidationErrorBody {
                kind: ErrorKind::ValidationError,
                details: ValidationDetails {
                    field: "visit_time".into(),
                    reason: "visit_date_incomplete".into(),
                    hint: "hint".into(),
                },
            },
        };
        let response = BotResponse::Invalid(failure);
        assert!(!response.is_processed());
        assert_eq!(response.intent(), BusinessIntent::VisitSchedule);

        let ok = BotResponse::Processed(ResponsePayload {
            intent: BusinessIntent::Unknown,
            entities: EntityBag::default(),
            crm_call: CrmCall::none(),
            result: ResultMessage {
                message: "m".into(),
            },
        });
        assert!(ok.is_processed());
    }

    #[test]
    fn test_empty_crm_call_serializes_nulls() {
        let json = serde_json::to_value(CrmCall::none()).unwrap();
        assert!(json["endpoint"].is_null());
        assert!(json["method"].is_null());
        assert_eq!(json["status_code"], 200);
    }
}
