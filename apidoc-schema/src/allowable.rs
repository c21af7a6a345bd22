//! Allowable value constraints attached to properties.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^range\s*([\[(])\s*([^,\s]+)\s*,\s*([^\])\s]+)\s*([\])])$")
        .expect("range pattern is valid")
});

/// Values a property may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllowableValues {
    /// An enumerated set of values.
    List { values: Vec<String> },
    /// A numeric range. Unbounded ends are `None`.
    Range {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<String>,
        exclusive_min: bool,
        exclusive_max: bool,
    },
}

impl AllowableValues {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Inclusive range between two bounds.
    pub fn range(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self::Range {
            min: Some(min.into()),
            max: Some(max.into()),
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Parse annotation text.
    ///
    /// `range[1, 10]` and `range(0, infinity]` describe ranges, where
    /// parentheses mark exclusive bounds and `infinity` or `-infinity` leaves
    /// an end open. Any other text is a comma separated list. Blank text and
    /// lists without any non-empty item yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = RANGE.captures(text) {
            return Some(Self::Range {
                min: bound(&caps[2]),
                max: bound(&caps[3]),
                exclusive_min: &caps[1] == "(",
                exclusive_max: &caps[4] == ")",
            });
        }

        let values: Vec<String> = text
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(Self::List { values })
        }
    }
}

fn bound(raw: &str) -> Option<String> {
    let unbounded = raw.eq_ignore_ascii_case("infinity")
        || raw.eq_ignore_ascii_case("-infinity")
        || raw.eq_ignore_ascii_case("+infinity");
    (!unbounded).then(|| raw.to_string())
}
