use std::sync::LazyLock;

use phonenumber::{country, Mode};
use regex::Regex;

static RE_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\+\s?)?\(?\d[\d\s().\-]{5,18}\d").unwrap());

static RE_DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}|\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}").unwrap()
});

static RE_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\-\s()]{6,}\d").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneMatch {
    /// Substring as it appeared in the text.
    pub raw: String,
    /// E.164 formatted number.
    pub e164: String,
}

/// Locale-aware phone number finder.
pub trait PhoneMatcher: Send + Sync {
    fn find_all(&self, text: &str) -> Vec<PhoneMatch>;
}

/// Phone matcher backed by libphonenumber metadata. National numbers are
/// read in the default region; `+` numbers may belong to any region.
pub struct RegionPhoneMatcher {
    region: country::Id,
}

impl RegionPhoneMatcher {
    pub fn new(region: &str) -> anyhow::Result<Self> {
        let region = region
            .trim()
            .to_uppercase()
            .parse::<country::Id>()
            .map_err(|_| anyhow::anyhow!("unsupported phone region: {region}"))?;
        Ok(Self { region })
    }

    fn format(&self, raw: &str) -> Option<String> {
        if RE_DATE_LIKE.is_match(raw) {
            return None;
        }
        let digits = raw.chars().filter(char::is_ascii_digit).count();
        if !(7..=15).contains(&digits) {
            return None;
        }

        let number = phonenumber::parse(Some(self.region), raw).ok()?;
        phonenumber::is_valid(&number).then(|| number.format().mode(Mode::E164).to_string())
    }

    /// Longest parseable run of whitespace-separated tokens, scanning from the
    /// left. A trailing digit group glued onto a number is shed this way.
    fn matches_within(&self, candidate: &str) -> Vec<PhoneMatch> {
        let tokens = token_spans(candidate);
        let mut found = Vec::new();
        let mut first = 0;

        'tokens: while first < tokens.len() {
            for last in (first..tokens.len()).rev() {
                let raw = &candidate[tokens[first].0..tokens[last].1];
                if let Some(e164) = self.format(raw) {
                    found.push(PhoneMatch {
                        raw: raw.to_string(),
                        e164,
                    });
                    first = last + 1;
                    continue 'tokens;
                }
            }
            first += 1;
        }
        found
    }
}

impl PhoneMatcher for RegionPhoneMatcher {
    fn find_all(&self, text: &str) -> Vec<PhoneMatch> {
        RE_CANDIDATE
            .find_iter(text)
            .filter(|m| stands_alone(text, m.start(), m.end()))
            .flat_map(|m| self.matches_within(m.as_str()))
            .collect()
    }
}

fn token_spans(s: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            if let Some(st) = start.take() {
                spans.push((st, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(st) = start {
        spans.push((st, s.len()));
    }
    spans
}

fn stands_alone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Matcher first; digit-run heuristic when nothing parses.
pub fn extract_phone(matcher: &dyn PhoneMatcher, text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    if let Some(found) = matcher.find_all(text).into_iter().next() {
        return Some(found.e164);
    }

    let raw = RE_DIGIT_RUN.find(text)?.as_str();
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    let digits: String = cleaned.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < 8 {
        return None;
    }
    if cleaned.starts_with('+') && (8..=15).contains(&digits.len()) {
        return Some(cleaned);
    }
    Some(digits)
}

/// Removes every matched phone substring from `text`.
pub fn strip_phones(matcher: &dyn PhoneMatcher, text: &str) -> String {
    matcher
        .find_all(text)
        .iter()
        .fold(text.to_string(), |acc, m| acc.replace(&m.raw, ""))
}
