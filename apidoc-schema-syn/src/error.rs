//! Error types for loading and resolving catalog types.

use thiserror::Error;

use crate::type_expr::TypeParseError;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading source into a [`TypeCatalog`](crate::TypeCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source is not valid Rust syntax.
    #[error("Failed to parse source: {0}")]
    Syntax(#[from] syn::Error),

    /// A `#[serde]` or `#[apidoc]` attribute could not be interpreted.
    #[error("Invalid attributes on '{type_name}': {message}")]
    Attributes { type_name: String, message: String },

    /// A field type uses syntax that cannot be documented.
    #[error("Unsupported type for field '{field}' of '{type_name}': {source}")]
    FieldType {
        type_name: String,
        field: String,
        #[source]
        source: TypeParseError,
    },

    /// Two definitions share a module path and name.
    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    /// A type expression could not be parsed.
    #[error(transparent)]
    TypeExpr(#[from] TypeParseError),

    /// A type name is not in the catalog.
    #[error("Unknown type '{0}'")]
    UnknownType(String),
}

impl CatalogError {
    pub(crate) fn attributes(type_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Attributes {
            type_name: type_name.into(),
            message: message.to_string(),
        }
    }
}
