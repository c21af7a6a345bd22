//! Mapper configuration.
//!
//! This module provides the [`MapperConfig`] struct, the configuration handle
//! consulted by bean metadata sources and the property deriver. A provider
//! receives it once, either at construction or through
//! [`FieldPropertyProvider::on_mapper_configured`](crate::FieldPropertyProvider::on_mapper_configured),
//! and reads it for the rest of its life.
//!
//! # Example
//! ```rust,ignore
//! use apidoc_schema::{MapperConfig, RenameRule};
//!
//! let config = MapperConfig::new()
//!     .with_naming(RenameRule::CamelCase)
//!     .with_max_unwrap_depth(8);
//! ```

use serde::{Deserialize, Serialize};

use crate::naming::RenameRule;

/// Default limit on nested unwrapped (flattened) fields.
pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 32;

/// Configuration shared by metadata introspection and property derivation.
///
/// # Fields
///
/// * `naming` - Property naming applied when neither the type nor the field
///   carries an explicit rename. Default: `None` (internal names are kept).
///
/// * `direction_aware_names` - Name properties with the deserialization name
///   when documenting request types. When disabled, the serialization name is
///   used in both directions. Default: false.
///
/// * `max_unwrap_depth` - Maximum nesting of unwrapped fields before derivation
///   fails. Default: 32.
///
/// * `include_skipped_if` - Whether fields that are conditionally skipped on
///   serialization are still documented for responses. Default: true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Fallback property naming (default: None)
    pub naming: Option<RenameRule>,
    /// Use direction-specific names (default: false)
    pub direction_aware_names: bool,
    /// Unwrap recursion limit (default: 32)
    pub max_unwrap_depth: usize,
    /// Document conditionally skipped fields (default: true)
    pub include_skipped_if: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            naming: None,
            direction_aware_names: false,
            max_unwrap_depth: DEFAULT_MAX_UNWRAP_DEPTH,
            include_skipped_if: true,
        }
    }
}

impl MapperConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback property naming rule.
    ///
    /// # Example
    /// ```rust,ignore
    /// let config = MapperConfig::new().with_naming(RenameRule::SnakeCase);
    /// ```
    pub fn with_naming(mut self, rule: RenameRule) -> Self {
        self.naming = Some(rule);
        self
    }

    /// Enable or disable direction-specific property names.
    pub fn with_direction_aware_names(mut self, enabled: bool) -> Self {
        self.direction_aware_names = enabled;
        self
    }

    /// Set the maximum unwrap depth.
    ///
    /// # Example
    /// ```rust,ignore
    /// let config = MapperConfig::new().with_max_unwrap_depth(4);
    /// ```
    pub fn with_max_unwrap_depth(mut self, depth: usize) -> Self {
        self.max_unwrap_depth = depth;
        self
    }

    /// Choose whether conditionally skipped fields are documented.
    pub fn with_include_skipped_if(mut self, include: bool) -> Self {
        self.include_skipped_if = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MapperConfig::default();
        assert_eq!(config.naming, None);
        assert!(!config.direction_aware_names);
        assert_eq!(config.max_unwrap_depth, DEFAULT_MAX_UNWRAP_DEPTH);
        assert!(config.include_skipped_if);
    }

    #[test]
    fn test_builders() {
        let config = MapperConfig::new()
            .with_naming(RenameRule::CamelCase)
            .with_direction_aware_names(true)
            .with_max_unwrap_depth(3)
            .with_include_skipped_if(false);

        assert_eq!(config.naming, Some(RenameRule::CamelCase));
        assert!(config.direction_aware_names);
        assert_eq!(config.max_unwrap_depth, 3);
        assert!(!config.include_skipped_if);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MapperConfig =
            serde_json::from_str(r#"{"naming":"camelCase"}"#).unwrap();
        assert_eq!(config.naming, Some(RenameRule::CamelCase));
        assert_eq!(config.max_unwrap_depth, DEFAULT_MAX_UNWRAP_DEPTH);
    }
}
