use std::sync::LazyLock;

use regex::Regex;

use super::phone::{strip_phones, PhoneMatcher};

static RE_LEAD_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-fA-F0-9]{4,36}\b").unwrap());

/// Hex-like lead identifier. Phone numbers are removed first, and a token that
/// is the whole transcript is not treated as an identifier.
pub fn extract_lead_id(matcher: &dyn PhoneMatcher, text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let cleaned = strip_phones(matcher, text);
    let candidate = RE_LEAD_ID.find(&cleaned)?.as_str();

    if candidate.to_lowercase() == cleaned.trim().to_lowercase() {
        return None;
    }
    Some(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::extraction::phone::RegionPhoneMatcher;

    fn matcher() -> RegionPhoneMatcher {
        RegionPhoneMatcher::new("IN").unwrap()
    }

    #[test]
    fn test_hex_identifier() {
        assert_eq!(
            extract_lead_id(&matcher(), "Schedule a visit for lead 7b1b8f54 at 3 pm tomorrow."),
            Some("7b1b8f54".to_string())
        );
    }

    #[test]
    fn test_short_identifier() {
        assert_eq!(
            extract_lead_id(&matcher(), "Modify lead 8c1d to follow up tomorrow."),
            Some("8c1d".to_string())
        );
    }

    #[test]
    fn test_phone_is_not_an_identifier() {
        assert_eq!(extract_lead_id(&matcher(), "Call Rohan on 9876543210"), None);
    }

    #[test]
    fn test_phone_followed_by_number_is_not_an_identifier() {
        assert_eq!(
            extract_lead_id(&matcher(), "New lead Rohan Sharma from Pune, phone 9876543210 2 bhk flat"),
            None
        );
    }

    #[test]
    fn test_whole_input_is_rejected() {
        assert_eq!(extract_lead_id(&matcher(), "7b1b8f54"), None);
    }

    #[test]
    fn test_no_identifier() {
        assert_eq!(extract_lead_id(&matcher(), "Can you help me?"), None);
    }
}
