use crate::errors::AppError;
use crate::models::{BusinessIntent, CrmCall};

const METHOD: &str = "POST";

/// Maps business intents onto CRM endpoint descriptors under a base path.
/// The endpoint is only described, never called.
#[derive(Debug, Clone)]
pub struct CrmRouter {
    base_path: String,
}

impl CrmRouter {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, intent: BusinessIntent) -> Result<CrmCall, AppError> {
        let suffix = match intent {
            BusinessIntent::LeadCreate => "/lead/create",
            BusinessIntent::VisitSchedule => "/visit/schedule",
            BusinessIntent::LeadUpdate => "/lead/update",
            BusinessIntent::Unknown => return Ok(CrmCall::none()),
        };

        if !self.base_path.starts_with('/') || self.base_path.chars().any(char::is_whitespace) {
            return Err(AppError::Crm(format!(
                "invalid CRM base path {:?} for intent {intent}",
                self.base_path
            )));
        }

        Ok(CrmCall {
            endpoint: Some(format!("{}{suffix}", self.base_path.trim_end_matches('/'))),
            method: Some(METHOD.to_string()),
            status_code: 200,
        })
    }
}

impl Default for CrmRouter {
    fn default() -> Self {
        Self::new("/crm")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_endpoint_table() {
        let router = CrmRouter::default();
        let call = router.resolve(BusinessIntent::LeadCreate).unwrap();
        assert_eq!(call.endpoint.as_deref(), Some("/crm/lead/create"));
        assert_eq!(call.method.as_deref(), Some("POST"));
        assert_eq!(call.status_code, 200);

        assert_eq!(
            router.resolve(BusinessIntent::VisitSchedule).unwrap().endpoint.as_deref(),
            Some("/crm/visit/schedule")
        );
        assert_eq!(
            router.resolve(BusinessIntent::LeadUpdate).unwrap().endpoint.as_deref(),
            Some("/crm/lead/update")
        );
    }

    #[test]
    fn test_unknown_has_no_endpoint() {
        assert_eq!(CrmRouter::default().resolve(BusinessIntent::Unknown).unwrap(), CrmCall::none());
    }

    #[test]
    fn test_trailing_slash_is_joined_once() {
        let call = CrmRouter::new("/api/crm/").resolve(BusinessIntent::LeadUpdate).unwrap();
        assert_eq!(call.endpoint.as_deref(), Some("/api/crm/lead/update"));
    }

    #[test]
    fn test_invalid_base_path() {
        let err = CrmRouter::new("crm").resolve(BusinessIntent::LeadCreate).unwrap_err();
        assert!(matches!(err, AppError::Crm(_)));
        assert!(CrmRouter::new("/my crm").resolve(BusinessIntent::LeadCreate).is_err());
        // Unknown never touches the base path.
        assert!(CrmRouter::new("crm").resolve(BusinessIntent::Unknown).is_ok());
    }
}
