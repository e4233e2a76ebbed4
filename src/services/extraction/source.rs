use std::sync::LazyLock;

use regex::Regex;

use crate::models::LeadSource;

/// Checked in order; the first keyword found wins. Keywords must start a
/// word but may be inflected ("called", "referred").
const SOURCE_KEYWORDS: &[(&str, LeadSource)] = &[
    ("instagram", LeadSource::Instagram),
    ("insta", LeadSource::Instagram),
    ("facebook", LeadSource::Facebook),
    ("fb", LeadSource::Facebook),
    ("linkedin", LeadSource::LinkedIn),
    ("linkedin.com", LeadSource::LinkedIn),
    ("google", LeadSource::Google),
    ("whatsapp", LeadSource::WhatsApp),
    ("wa.me", LeadSource::WhatsApp),
    ("website", LeadSource::Website),
    ("form", LeadSource::Website),
    ("walk-in", LeadSource::WalkIn),
    ("walk in", LeadSource::WalkIn),
    ("referral", LeadSource::Referral),
    ("refer", LeadSource::Referral),
    ("call", LeadSource::Call),
    ("phone", LeadSource::Call),
];

static KEYWORD_PATTERNS: LazyLock<Vec<(Regex, LeadSource)>> = LazyLock::new(|| {
    SOURCE_KEYWORDS
        .iter()
        .map(|(kw, source)| {
            let re = Regex::new(&format!(r"\b{}", regex::escape(kw))).unwrap();
            (re, *source)
        })
        .collect()
});

static RE_SOURCE_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(instagram\.com|linkedin\.com|facebook\.com|wa\.me|whatsapp\.com)").unwrap()
});

pub fn extract_source(text: &str) -> Option<LeadSource> {
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();

    if let Some((_, source)) = KEYWORD_PATTERNS.iter().find(|(re, _)| re.is_match(&lower)) {
        return Some(*source);
    }

    let domain = RE_SOURCE_DOMAIN.find(&lower)?.as_str();
    if domain.contains("instagram") {
        Some(LeadSource::Instagram)
    } else if domain.contains("linkedin") {
        Some(LeadSource::LinkedIn)
    } else if domain.contains("facebook") {
        Some(LeadSource::Facebook)
    } else {
        Some(LeadSource::WhatsApp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_keyword_in_table_order() {
        assert_eq!(
            extract_source("Add a new lead: Rohan Sharma, phone 9876543210, source Instagram."),
            Some(LeadSource::Instagram)
        );
    }

    #[test]
    fn test_keyword_must_start_a_word() {
        assert_eq!(extract_source("please share the information"), None);
        assert_eq!(extract_source("came through a walk-in"), Some(LeadSource::WalkIn));
    }

    #[test]
    fn test_inflected_keywords_match() {
        assert_eq!(
            extract_source("Add lead Meera, she was referred by a friend, phone 9876543210"),
            Some(LeadSource::Referral)
        );
        assert_eq!(
            extract_source("He called us yesterday, add lead Amit"),
            Some(LeadSource::Call)
        );
        assert_eq!(extract_source("Instagrammer campaign"), Some(LeadSource::Instagram));
    }

    #[test]
    fn test_domain_fallback() {
        assert_eq!(
            extract_source("profile at https://www.myinstagram.com/rohan"),
            Some(LeadSource::Instagram)
        );
        assert_eq!(extract_source("ping via https://wa.me/919876543210"), Some(LeadSource::WhatsApp));
    }

    #[test]
    fn test_no_source() {
        assert_eq!(extract_source("Can you help me?"), None);
    }
}
