use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;

use super::phone::{strip_phones, PhoneMatcher};

const MONTHS: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static RE_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

static RE_NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2,4})\b").unwrap());

static RE_DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTHS}\b(?:,?\s+(\d{{4}}))?"
    ))
    .unwrap()
});

static RE_MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b{MONTHS}\.?\s+(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(?:of\s+)?(\d{{4}}))?"
    ))
    .unwrap()
});

static RE_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(?:next|this|coming|on)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .unwrap()
});

static RE_CLOCK_MERIDIEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\s*([ap])\.?m\b").unwrap());

static RE_CLOCK_24H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());

static RE_CLOCK_OCLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})\s+o'?clock\b").unwrap());

static RE_RELATIVE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b").unwrap());

/// Forward window in which candidate dates are preferred.
const HORIZON_DAYS: i64 = 365;

pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Visit time mentioned in `text`, relative to `now`.
///
/// Phone numbers are removed before searching. Explicit dates win; among
/// several, the earliest inside the next year is chosen, else the earliest
/// of all. Without an explicit
/// date, "today" / "tomorrow" / "day after tomorrow" combine with a clock
/// time, and a relative day with no time yields nothing.
pub fn extract_datetime(
    matcher: &dyn PhoneMatcher,
    text: &str,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    let cleaned = strip_phones(matcher, text);

    let found = search_dates(&cleaned, now);
    let horizon = now + Duration::days(HORIZON_DAYS);
    let upcoming = found.iter().filter(|dt| **dt >= now && **dt <= horizon).min();
    match upcoming.or_else(|| found.iter().min()) {
        Some(dt) => Some(*dt),
        None => relative_day(&cleaned, now),
    }
}

pub fn format_iso(dt: NaiveDateTime) -> String {
    dt.format(ISO_FORMAT).to_string()
}

/// All explicit dates in `text`, each combined with the first clock time.
pub fn search_dates(text: &str, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    let lower = text.to_lowercase();
    let today = now.date();
    let mut dates: Vec<NaiveDate> = Vec::new();

    for caps in RE_ISO_DATE.captures_iter(&lower) {
        dates.extend(ymd(num(&caps[1]), num(&caps[2]), num(&caps[3])));
    }

    for caps in RE_NUMERIC_DATE.captures_iter(&lower) {
        let mut year = num(&caps[3]);
        if year < 100 {
            year += 2000;
        }
        dates.extend(ymd(year, num(&caps[2]), num(&caps[1])));
    }

    for caps in RE_DAY_MONTH.captures_iter(&lower) {
        let Some(month) = month_number(&caps[2]) else {
            continue;
        };
        let year = caps.get(3).map(|m| num(m.as_str()));
        dates.extend(with_year(today, year, month, num(&caps[1])));
    }

    for caps in RE_MONTH_DAY.captures_iter(&lower) {
        let Some(month) = month_number(&caps[1]) else {
            continue;
        };
        let year = caps.get(3).map(|m| num(m.as_str()));
        dates.extend(with_year(today, year, month, num(&caps[2])));
    }

    for caps in RE_WEEKDAY.captures_iter(&lower) {
        if let Some(weekday) = weekday(&caps[1]) {
            dates.push(next_weekday(today, weekday));
        }
    }

    let time = clock_time(&lower).unwrap_or_default();
    dates.into_iter().map(|d| d.and_time(time)).collect()
}

fn relative_day(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lower = text.to_lowercase();

    let (offset, phrase) = [
        (2, "day after tomorrow"),
        (1, "tomorrow"),
        (0, "today"),
    ]
    .into_iter()
    .find(|(_, phrase)| lower.contains(phrase))?;
    let rest = lower.replacen(phrase, "", 1);

    let caps = RE_RELATIVE_TIME.captures(&rest)?;
    let mut hour = num(&caps[1]);
    let minute = caps.get(2).map_or(0, |m| num(m.as_str()));
    match caps.get(3).map(|m| m.as_str()) {
        Some("pm") if hour != 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some((now.date() + Duration::days(offset)).and_time(time))
}

/// Leftmost clock time: `3 pm`, `9:30 a.m.`, `18:30`, `5 o'clock`.
fn clock_time(lower: &str) -> Option<NaiveTime> {
    let meridiem = RE_CLOCK_MERIDIEM.captures(lower).and_then(|caps| {
        let mut hour = num(&caps[1]);
        let minute = caps.get(2).map_or(0, |m| num(m.as_str()));
        if hour == 0 || hour > 12 {
            return None;
        }
        match &caps[3] {
            "p" if hour != 12 => hour += 12,
            "a" if hour == 12 => hour = 0,
            _ => {}
        }
        Some((caps.get(0)?.start(), NaiveTime::from_hms_opt(hour, minute, 0)?))
    });

    let twenty_four = RE_CLOCK_24H.captures(lower).and_then(|caps| {
        let time = NaiveTime::from_hms_opt(num(&caps[1]), num(&caps[2]), 0)?;
        Some((caps.get(0)?.start(), time))
    });

    let oclock = RE_CLOCK_OCLOCK.captures(lower).and_then(|caps| {
        let time = NaiveTime::from_hms_opt(num(&caps[1]), 0, 0)?;
        Some((caps.get(0)?.start(), time))
    });

    // On equal positions the meridiem form wins, it carries more information.
    [meridiem, twenty_four, oclock]
        .into_iter()
        .flatten()
        .min_by_key(|(start, _)| *start)
        .map(|(_, time)| time)
}

fn num(s: &str) -> u32 {
    s.parse().unwrap_or(0)
}

fn ymd(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Explicit year as given; otherwise the next occurrence on or after today.
fn with_year(today: NaiveDate, year: Option<u32>, month: u32, day: u32) -> Option<NaiveDate> {
    if let Some(year) = year {
        return ymd(year, month, day);
    }
    let this_year = u32::try_from(today.year()).ok()?;
    match ymd(this_year, month, day) {
        Some(date) if date >= today => Some(date),
        _ => ymd(this_year + 1, month, day),
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday(name: &str) -> Option<Weekday> {
    name.parse().ok()
}

/// Next occurrence strictly after `today`.
fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let current = i64::from(today.weekday().num_days_from_monday());
    let wanted = i64::from(target.num_days_from_monday());
    let mut ahead = (wanted - current).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    today + Duration::days(ahead)
}
