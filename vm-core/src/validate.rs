use std::{collections::BTreeMap, fmt, str::FromStr};

use regex::Regex;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

pub use fast_chemail::is_valid_email;

const DATE_FORMAT: &[FormatItem] = format_description!("[year]-[month]-[day]");

/// Name of a form field as used in the markup.
pub type Field = &'static str;

/// Turns raw form input into a typed payload.
pub trait Validate {
    type Output;
    fn validate(&self, now: OffsetDateTime) -> Result<Self::Output, FieldErrors>;
}

/// A single declarative constraint together with its user facing message.
///
/// All rules except [`Rule::Required`] and [`Rule::EqualTo`] hold
/// for blank input, so optional fields simply omit `Required`.
#[derive(Debug, Clone, Copy)]
pub enum Rule<'a> {
    Required(&'static str),
    MinLength(usize, &'static str),
    MaxLength(usize, &'static str),
    Min(f64, &'static str),
    Max(f64, &'static str),
    Pattern(&'a Regex, &'static str),
    Email(&'static str),
    WebUrl(&'static str),
    EqualTo(&'a str, &'static str),
    DateAfter(Date, &'static str),
}

impl Rule<'_> {
    const fn message(&self) -> &'static str {
        match self {
            Self::Required(msg)
            | Self::MinLength(_, msg)
            | Self::MaxLength(_, msg)
            | Self::Min(_, msg)
            | Self::Max(_, msg)
            | Self::Pattern(_, msg)
            | Self::Email(msg)
            | Self::WebUrl(msg)
            | Self::EqualTo(_, msg)
            | Self::DateAfter(_, msg) => *msg,
        }
    }

    fn holds(&self, value: &str) -> bool {
        let trimmed = value.trim();
        match self {
            Self::Required(_) => !trimmed.is_empty(),
            Self::EqualTo(other, _) => value == *other,
            _ if trimmed.is_empty() => true,
            Self::MinLength(min, _) => trimmed.chars().count() >= *min,
            Self::MaxLength(max, _) => trimmed.chars().count() <= *max,
            Self::Min(min, _) => parse_number(trimmed).is_some_and(|x| x >= *min),
            Self::Max(max, _) => parse_number(trimmed).is_some_and(|x| x <= *max),
            Self::Pattern(re, _) => re.is_match(trimmed),
            Self::Email(_) => is_valid_email(trimmed),
            Self::WebUrl(_) => is_web_url(trimmed),
            Self::DateAfter(date, _) => parse_date(trimmed).is_some_and(|d| d > *date),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|x| x.is_finite())
}

fn is_web_url(s: &str) -> bool {
    url::Url::parse(s).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Parses the value of a `<input type="date">`.
#[must_use]
pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), DATE_FORMAT).ok()
}

/// Formats a date the way `<input type="date">` expects it.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Validation errors keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Evaluates the rules of a field in order and records the first violation.
    pub fn check(&mut self, field: Field, value: &str, rules: &[Rule<'_>]) -> &mut Self {
        if let Some(rule) = rules.iter().find(|r| !r.holds(value)) {
            self.insert(field, rule.message());
        }
        self
    }

    /// Parses an already checked value.
    ///
    /// Records `message` for the field if the value cannot be parsed.
    pub fn parse<T>(&mut self, field: Field, value: &str, message: &str) -> Option<T>
    where
        T: FromStr,
    {
        let parsed = value.trim().parse().ok();
        if parsed.is_none() && !self.contains(field) {
            self.insert(field, message);
        }
        parsed
    }

    /// Like [`FieldErrors::parse`] but blank input yields `Some(None)`.
    pub fn parse_optional<T>(&mut self, field: Field, value: &str, message: &str) -> Option<Option<T>>
    where
        T: FromStr,
    {
        if value.trim().is_empty() {
            return Some(None);
        }
        self.parse(field, value, message).map(Some)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Returns `value` if no field has been rejected.
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        value().ok_or(self)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}
