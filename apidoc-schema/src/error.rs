//! Error types for property derivation.
//!
//! Only misuse and extension failures are errors. Fields that are not
//! documentable for a direction, members without a primary accessor and types
//! that classify ambiguously are handled by exclusion or by falling back to a
//! scalar reference, never by failing the whole type.
//!
//! # Example
//! ```rust,ignore
//! use apidoc_schema::DeriveError;
//!
//! match provider.derive_properties(&ty, &ctx) {
//!     Ok(props) => render(props),
//!     Err(DeriveError::ConfigurationNotReady) => panic!("provider used before configuration"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use thiserror::Error;

use crate::plugin::PluginError;

/// Errors raised while deriving model properties.
#[derive(Debug, Error)]
pub enum DeriveError {
    /// The provider was used before its mapper configuration was supplied.
    #[error("mapper configuration has not been set; call on_mapper_configured first")]
    ConfigurationNotReady,

    /// A second configuration was supplied to a configured provider.
    #[error("mapper configuration has already been set")]
    ConfigurationAlreadySet,

    /// A post-processing plugin rejected a property.
    #[error(transparent)]
    PostProcessing(#[from] PluginError),

    /// A property builder was finalized without a required attribute.
    #[error("property is missing required attribute '{missing}'")]
    IncompleteProperty { missing: &'static str },

    /// An unwrapped field expands into a type that is already being expanded.
    #[error("unwrapped field cycle detected: {}", .path.join(" -> "))]
    UnwrapCycle { path: Vec<String> },

    /// Unwrapped fields nest deeper than the configured limit.
    #[error("unwrapped fields nest deeper than {limit} levels: {}", .path.join(" -> "))]
    UnwrapDepthExceeded { limit: usize, path: Vec<String> },
}

/// Result type for property derivation.
pub type DeriveResult<T> = Result<T, DeriveError>;
