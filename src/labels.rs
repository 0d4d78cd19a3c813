// WHY: Text shaping applied to retrieved labels and comments before they land on a card
// Pure string functions; retrieval itself happens elsewhere

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::sentence_detector::FirstSentenceExtractor;

pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const XSD_TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
pub const XSD_DATETIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// Shown on a card when a member has no value for a stat
pub const UNKNOWN_STAT: &str = "Unknown";

/// Separator between duplicate values joined upstream
pub const VALUE_SEPARATOR: char = '|';

/// First of several `|`-joined values, or `None` when nothing was retrieved
pub fn first_value(joined: &str) -> Option<&str> {
    if joined.is_empty() {
        return None;
    }
    joined.split(VALUE_SEPARATOR).next()
}

/// Card or deck description: the first sentence of the first joined value
pub fn describe<'a>(extractor: &FirstSentenceExtractor, joined: &'a str) -> Option<&'a str> {
    first_value(joined).map(|value| extractor.first_sentence(value))
}

/// Friendly title from a resource URI, e.g. `.../populationTotal` -> "Population Total"
pub fn uri_to_friendly(uri: &str) -> String {
    let name = uri.rsplit(['/', '#']).next().unwrap_or(uri).trim();
    title_case(&space_words(name))
}

/// Break a camel-case or snake-case identifier into space-separated words
fn space_words(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut spaced = String::with_capacity(name.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            spaced.push(' ');
            continue;
        }
        if i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let lower_or_digit_to_upper =
                (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && c.is_ascii_uppercase();
            let lower_to_digit = prev.is_ascii_lowercase() && c.is_ascii_digit();
            // "HTMLParser": split before the capital that starts "Parser"
            let acronym_end = prev.is_ascii_uppercase()
                && c.is_ascii_uppercase()
                && next.is_some_and(|n| n.is_ascii_lowercase());
            if lower_or_digit_to_upper || lower_to_digit || acronym_end {
                spaced.push(' ');
            }
        }
        spaced.push(c);
    }

    spaced
}

/// Upper-case the first letter of every run of letters, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            titled.push(c);
            in_word = false;
        }
    }

    titled
}

/// Suffix rules, first match wins: (suffixes, characters to drop, replacement)
const PLURAL_RULES: &[(&[&str], usize, &str)] = &[
    (&["ium", "tum", "lum", "ion"], 2, "a"),
    (&["ula", "mna", "nna", "rva", "tia"], 0, "e"),
    (&["ay", "ey", "iy", "oy", "uy"], 0, "s"),
    (&["is"], 2, "es"),
    (&["us", "um"], 2, "i"),
    (&["ex", "ix"], 2, "ices"),
    (&["ni"], 0, ""),
    (&["y"], 1, "ies"),
    (&["s", "x", "ch", "sh"], 0, "es"),
];

/// Plural deck name from a singular category name
pub fn pluralise(name: &str) -> String {
    for (suffixes, drop, replacement) in PLURAL_RULES {
        if suffixes.iter().any(|suffix| name.ends_with(suffix)) {
            // suffixes are ASCII, so the byte cut lands on a char boundary
            let stem = &name[..name.len() - drop];
            return format!("{stem}{replacement}");
        }
    }
    format!("{name}s")
}

/// Filesystem-safe name: lower-case, underscores for spaces, `[0-9a-z_-]` only
pub fn friendly_to_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_digit() || c.is_ascii_lowercase() || *c == '_' || *c == '-')
        .collect()
}

/// Card text for one typed stat value
///
/// Dates become "26 Oct, 2001", times "02:30PM", date-times
/// "08:17PM on 20 Jul, 1969", booleans "Yes"/"No", and anything else a
/// number with thousands separators. A value that does not parse as its
/// datatype is returned unchanged.
pub fn format_stat(datatype: &str, value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return UNKNOWN_STAT.to_string();
    };

    match parse_stat(datatype, value.trim()) {
        Some(formatted) => formatted,
        None => {
            warn!(value, datatype, "Failed to parse stat value");
            value.to_string()
        }
    }
}

fn parse_stat(datatype: &str, value: &str) -> Option<String> {
    // Older datasets spell the datetime type in lower case
    if datatype.eq_ignore_ascii_case(XSD_DATETIME) {
        return parse_datetime(value).map(|dt| dt.format("%I:%M%p on %d %b, %Y").to_string());
    }

    match datatype {
        XSD_DATE => parse_date(value).map(|d| d.format("%d %b, %Y").to_string()),
        XSD_TIME => parse_time(value).map(|t| t.format("%I:%M%p").to_string()),
        XSD_BOOLEAN => match value {
            "true" | "1" => Some("Yes".to_string()),
            "false" | "0" => Some("No".to_string()),
            _ => None,
        },
        _ => format_number(value),
    }
}

// Timezones are accepted and dropped; cards show the written wall-clock value
fn parse_date(value: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%Y-%m-%dZ", "%Y-%m-%d%:z"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    ["%H:%M:%S%.f", "%H:%M:%S%.fZ", "%H:%M:%S%.f%:z"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
}

/// Integral values get thousands separators, others their shortest form
fn format_number(value: &str) -> Option<String> {
    let number: f64 = value.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    if number.fract() != 0.0 || number.abs() >= 1e15 {
        return Some(number.to_string());
    }

    // adding 0.0 turns -0 into 0
    let digits = format!("{:.0}", number.abs() + 0.0);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if number < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    Some(grouped)
}
