use appsign_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// LanguageTag is a well-formed BCP 47 language tag in canonical case.
///
/// The language is lowercased, scripts are titlecased and regions uppercased, so
/// `EN-us` becomes `en-US`. A wildcard range turns into `und`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// The tag as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// The region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.0
            .split('-')
            .skip(1)
            .take_while(|v| v.len() > 1)
            .find(|v| is_region(v))
    }

    fn from_range(range: &str) -> Option<Self> {
        if range == "*" {
            return Some(Self("und".to_string()));
        }

        let mut subtags = Vec::new();
        let mut in_extension = false;
        for (idx, subtag) in range.split('-').enumerate() {
            if subtag.is_empty() || subtag.len() > 8 {
                return None;
            }
            if subtag == "*" {
                if idx == 0 {
                    return None;
                }
                continue;
            }
            if idx == 0 {
                if !subtag.bytes().all(|b| b.is_ascii_alphabetic()) {
                    return None;
                }
                subtags.push(subtag.to_ascii_lowercase());
                continue;
            }
            if !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return None;
            }

            in_extension |= subtag.len() == 1;
            let subtag = if in_extension {
                subtag.to_ascii_lowercase()
            } else if is_region(subtag) {
                subtag.to_ascii_uppercase()
            } else if subtag.len() == 4 && subtag.bytes().all(|b| b.is_ascii_alphabetic()) {
                let (head, tail) = subtag.split_at(1);
                head.to_ascii_uppercase() + &tail.to_ascii_lowercase()
            } else {
                subtag.to_ascii_lowercase()
            };
            subtags.push(subtag);
        }

        Some(Self(subtags.join("-")))
    }
}

fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()))
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_range(s.trim())
            .ok_or_else(|| Error::request_invalid(format!("invalid language tag: {s}")))
    }
}

/// Parse an `Accept-Language` header value into language tags, most preferred first.
///
/// Entries are ordered by their quality weight, highest first. Entries sharing a
/// weight keep the order of the header.
///
/// ```
/// use appsign_appmarket::parse_accept_language;
///
/// let tags = parse_accept_language("fr;q=0.5, en-us, de;q=0.8").unwrap();
/// let tags: Vec<_> = tags.iter().map(|v| v.as_str()).collect();
/// assert_eq!(tags, ["en-US", "de", "fr"]);
/// ```
pub fn parse_accept_language(header: &str) -> Result<Vec<LanguageTag>> {
    let err = || {
        Error::request_invalid(format!(
            "Failed to parse Locale from Accept-Language header with value={header}"
        ))
    };

    let compact: String = header.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(err());
    }

    let mut ranges = Vec::new();
    for entry in compact.split(',') {
        let (range, weight) = match entry.split_once(';') {
            None => (entry, 1.0),
            Some((range, param)) => {
                let weight = param
                    .strip_prefix("q=")
                    .or_else(|| param.strip_prefix("Q="))
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|v| (0.0..=1.0).contains(v))
                    .ok_or_else(err)?;
                (range, weight)
            }
        };
        let tag = LanguageTag::from_range(range).ok_or_else(err)?;
        ranges.push((tag, weight));
    }

    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(ranges.into_iter().map(|(tag, _)| tag).collect())
}
