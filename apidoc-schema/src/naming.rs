//! Property naming.
//!
//! A [`NamingStrategy`] turns the serialization metadata of a property into
//! the name shown in documentation. [`RenameRule`] is the case conversion
//! shared by naming strategies and metadata sources.

use std::fmt;
use std::str::FromStr;

use convert_case::{Boundary, Case, Casing};
use serde::{Deserialize, Serialize};

use crate::metadata::PropertyMetadata;

const VARIANT_WORD_START: Boundary = Boundary::Custom {
    condition: starts_uppercase_word,
    start: 1,
    len: 0,
};

fn starts_uppercase_word(graphemes: &[&str]) -> bool {
    graphemes
        .get(1)
        .and_then(|g| g.chars().next())
        .is_some_and(char::is_uppercase)
}

/// Case convention for field and variant names, using the serde spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenameRule {
    /// lowercase
    #[serde(rename = "lowercase")]
    Lowercase,

    /// UPPERCASE
    #[serde(rename = "UPPERCASE")]
    Uppercase,

    /// PascalCase
    #[serde(rename = "PascalCase")]
    PascalCase,

    /// camelCase
    #[serde(rename = "camelCase")]
    CamelCase,

    /// snake_case
    #[serde(rename = "snake_case")]
    SnakeCase,

    /// SCREAMING_SNAKE_CASE
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,

    /// kebab-case
    #[serde(rename = "kebab-case")]
    KebabCase,

    /// SCREAMING-KEBAB-CASE
    #[serde(rename = "SCREAMING-KEBAB-CASE")]
    ScreamingKebabCase,
}

impl RenameRule {
    pub const ALL: [RenameRule; 8] = [
        RenameRule::Lowercase,
        RenameRule::Uppercase,
        RenameRule::PascalCase,
        RenameRule::CamelCase,
        RenameRule::SnakeCase,
        RenameRule::ScreamingSnakeCase,
        RenameRule::KebabCase,
        RenameRule::ScreamingKebabCase,
    ];

    /// Rename a snake_case field name the way serde does.
    ///
    /// Words are split at underscores only, so digits stay attached to the
    /// word they follow (`address_line1` becomes `addressLine1`).
    pub fn apply_to_field(&self, field: &str) -> String {
        match self {
            RenameRule::Lowercase | RenameRule::SnakeCase => field.to_string(),
            RenameRule::Uppercase | RenameRule::ScreamingSnakeCase => field.to_uppercase(),
            RenameRule::PascalCase => field.from_case(Case::Snake).to_case(Case::Pascal),
            RenameRule::CamelCase => field.from_case(Case::Snake).to_case(Case::Camel),
            RenameRule::KebabCase => field.replace('_', "-"),
            RenameRule::ScreamingKebabCase => field.to_uppercase().replace('_', "-"),
        }
    }

    /// Rename a PascalCase variant name the way serde does.
    ///
    /// A new word starts at every uppercase letter, so `Version2` stays one
    /// word and `HttpApi` has two.
    pub fn apply_to_variant(&self, variant: &str) -> String {
        let words = || variant.set_boundaries(&[VARIANT_WORD_START]);
        match self {
            RenameRule::Lowercase => variant.to_lowercase(),
            RenameRule::Uppercase => variant.to_uppercase(),
            RenameRule::PascalCase => variant.to_string(),
            RenameRule::CamelCase => words().to_case(Case::Camel),
            RenameRule::SnakeCase => words().to_case(Case::Snake),
            RenameRule::ScreamingSnakeCase => words().to_case(Case::UpperSnake),
            RenameRule::KebabCase => words().to_case(Case::Kebab),
            RenameRule::ScreamingKebabCase => words().to_case(Case::Kebab).to_uppercase(),
        }
    }

    /// The serde spelling of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenameRule::Lowercase => "lowercase",
            RenameRule::Uppercase => "UPPERCASE",
            RenameRule::PascalCase => "PascalCase",
            RenameRule::CamelCase => "camelCase",
            RenameRule::SnakeCase => "snake_case",
            RenameRule::ScreamingSnakeCase => "SCREAMING_SNAKE_CASE",
            RenameRule::KebabCase => "kebab-case",
            RenameRule::ScreamingKebabCase => "SCREAMING-KEBAB-CASE",
        }
    }

    /// Parse a serde spelling such as `"camelCase"`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == s)
    }
}

impl fmt::Display for RenameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown rename rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rename rule '{0}'")]
pub struct UnknownRenameRule(pub String);

impl FromStr for RenameRule {
    type Err = UnknownRenameRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRenameRule(s.to_string()))
    }
}

/// Maps property metadata to its documented name.
pub trait NamingStrategy: Send + Sync {
    fn name_for(&self, metadata: &PropertyMetadata, for_serialization: bool) -> String;
}

/// Uses the name the metadata source computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataNamingStrategy;

impl NamingStrategy for MetadataNamingStrategy {
    fn name_for(&self, metadata: &PropertyMetadata, for_serialization: bool) -> String {
        metadata.name_for(for_serialization).to_string()
    }
}

/// Applies a case rule to internal names.
///
/// Explicitly named properties keep their explicit name.
#[derive(Debug, Clone, Copy)]
pub struct RenameNamingStrategy {
    rule: RenameRule,
}

impl RenameNamingStrategy {
    pub fn new(rule: RenameRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> RenameRule {
        self.rule
    }
}

impl NamingStrategy for RenameNamingStrategy {
    fn name_for(&self, metadata: &PropertyMetadata, for_serialization: bool) -> String {
        if metadata.explicitly_named {
            metadata.name_for(for_serialization).to_string()
        } else {
            self.rule.apply_to_field(&metadata.internal_name)
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    /// Identifier-like field names: 1-3 lowercase words joined by underscores.
    fn arb_identifier() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-z]{1,10}", 1..=3).prop_map(|words| words.join("_"))
    }

    fn arb_rename_rule() -> impl Strategy<Value = RenameRule> {
        proptest::sample::select(RenameRule::ALL.to_vec())
    }

    proptest! {
        /// Renaming never produces an empty name and never leaves separators
        /// from another convention behind.
        #[test]
        fn prop_rename_output_follows_convention(name in arb_identifier(), rule in arb_rename_rule()) {
            let result = rule.apply_to_field(&name);
            prop_assert!(!result.is_empty());

            match rule {
                RenameRule::CamelCase | RenameRule::PascalCase => {
                    prop_assert!(!result.contains('_') && !result.contains('-'), "{}", result);
                }
                RenameRule::SnakeCase | RenameRule::Lowercase => {
                    prop_assert!(result.chars().all(|c| c.is_lowercase() || c == '_'), "{}", result);
                }
                RenameRule::ScreamingSnakeCase | RenameRule::Uppercase => {
                    prop_assert!(result.chars().all(|c| c.is_uppercase() || c == '_'), "{}", result);
                }
                RenameRule::KebabCase => {
                    prop_assert!(result.chars().all(|c| c.is_lowercase() || c == '-'), "{}", result);
                }
                RenameRule::ScreamingKebabCase => {
                    prop_assert!(result.chars().all(|c| c.is_uppercase() || c == '-'), "{}", result);
                }
            }
        }

        /// Snake case input survives a snake_case rename unchanged.
        #[test]
        fn prop_snake_case_is_identity_on_snake_input(name in arb_identifier()) {
            prop_assert_eq!(RenameRule::SnakeCase.apply_to_field(&name), name);
        }
    }
}
