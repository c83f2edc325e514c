//! Dotted paths into JSON documents.
//!
//! `entry.2.resource.valueQuantity.value` walks key `entry`, index 2, then
//! keys `resource`, `valueQuantity`, `value`. A segment of ASCII digits
//! indexes an array; applied to an object it is an ordinary key.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// A parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

/// Outcome of resolving a path.
///
/// A missing key, an out-of-range index, and a step into a scalar all yield
/// the same [`Resolved::Absent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Absent,
    Value(&'a Value),
}

impl Resolved<'_> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    pub fn to_owned_value(&self) -> Option<Value> {
        match self {
            Resolved::Absent => None,
            Resolved::Value(value) => Some((*value).clone()),
        }
    }
}

impl fmt::Display for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Absent => f.write_str("<absent>"),
            Resolved::Value(value) => write!(f, "{value}"),
        }
    }
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let raw = path.trim().to_string();
        let segments = raw.split('.').map(str::to_string).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn resolve<'a>(&self, document: &'a Value) -> Resolved<'a> {
        let mut current = document;
        for segment in &self.segments {
            let next = match current {
                Value::Array(items) if is_index(segment) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                Value::Object(map) => map.get(segment),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return Resolved::Absent,
            }
        }
        Resolved::Value(current)
    }
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for FieldPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Reads one path per line, skipping blank lines.
pub fn parse_field_list(text: &str) -> Vec<FieldPath> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(FieldPath::parse)
        .collect()
}
