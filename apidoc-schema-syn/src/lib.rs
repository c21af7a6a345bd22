//! # apidoc-schema-syn
//!
//! Feeds [`apidoc_schema`] from Rust source code.
//!
//! Struct and enum definitions are parsed with `syn` into a [`TypeCatalog`].
//! The catalog then backs the two reflection collaborators a
//! [`FieldPropertyProvider`] needs:
//!
//! - [`SynFieldEnumerator`] lists named struct fields with their resolved types
//! - [`SerdeMetadataSource`] reports names and visibility from `#[serde]` attributes
//!
//! ## Supported Attributes
//!
//! | Attribute | Level | Effect |
//! |-----------|-------|--------|
//! | `#[serde(rename_all = "...")]` | container | Case convention for fields and variants |
//! | `#[serde(rename = "...")]` | field, variant | Explicit name, optionally per direction |
//! | `#[serde(skip)]`, `skip_serializing`, `skip_deserializing` | field, variant | Exclude from one or both directions |
//! | `#[serde(skip_serializing_if = "...")]` | field | Excluded from responses when the mapper asks for it |
//! | `#[serde(flatten)]` | field | Unwrap the field's properties into its owner |
//! | `#[apidoc(...)]` | field | Documentation annotations, see [`attributes`] |
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use apidoc_schema::{AlternateTypeProvider, DocumentationType, MapperConfig, ModelContext, ModelPropertiesProvider};
//! use apidoc_schema_syn::{field_property_provider, TypeCatalog};
//!
//! let catalog = Arc::new(TypeCatalog::from_source(include_str!("models.rs"))?);
//! let provider = field_property_provider(catalog.clone());
//! provider.on_mapper_configured(MapperConfig::default())?;
//!
//! let order = catalog.resolve_defined("Order")?;
//! let alternates = AlternateTypeProvider::new();
//! let ctx = ModelContext::return_value(&order, DocumentationType::OpenApi3, &alternates);
//! let properties = provider.derive_properties(&order, &ctx)?;
//! ```

pub mod attributes;
pub mod catalog;
pub mod enumerator;
pub mod error;
pub mod metadata;
pub mod resolver;
pub mod serde_compat;
pub mod type_expr;

use std::sync::Arc;

use apidoc_schema::{DefaultTypeNameExtractor, FieldPropertyProvider};

pub use catalog::{DefinitionKind, FieldDefinition, TypeCatalog, TypeDefinition, VariantDefinition};
pub use enumerator::SynFieldEnumerator;
pub use error::{CatalogError, CatalogResult};
pub use metadata::SerdeMetadataSource;
pub use resolver::{Bindings, Resolution, TypeResolver};
pub use type_expr::{TypeExpr, TypeExprParser, TypeParseError};

/// Build an unconfigured provider over `catalog` with default type naming.
///
/// Call [`FieldPropertyProvider::on_mapper_configured`] before deriving.
pub fn field_property_provider(catalog: Arc<TypeCatalog>) -> FieldPropertyProvider {
    FieldPropertyProvider::new(
        Arc::new(SynFieldEnumerator::new(catalog.clone())),
        Arc::new(SerdeMetadataSource::new(catalog)),
        Arc::new(DefaultTypeNameExtractor::default()),
    )
}
