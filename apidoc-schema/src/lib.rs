//! # apidoc-schema
//!
//! Derives the documentable properties of data types for API documentation.
//!
//! Given a resolved type and a [`ModelContext`], a [`FieldPropertyProvider`]
//! produces an ordered list of [`ModelProperty`] values: one per field that
//! takes part in serialization for the requested direction, with unwrapped
//! (flattened) fields expanded in place.
//!
//! ## Overview
//!
//! The provider does not inspect types itself. It is assembled from
//! collaborators:
//!
//! | Collaborator | Role |
//! |--------------|------|
//! | [`FieldEnumerator`] | Lists the declared fields of a type |
//! | [`BeanMetadataSource`] | Reports names and visibility per direction |
//! | [`NamingStrategy`] | Picks the documented property name |
//! | [`TypeNameExtractor`] | Renders type display names |
//! | [`PluginChain`] | Post-processes every property before it is built |
//!
//! The `apidoc-schema-syn` crate implements the reflection side over Rust
//! source parsed with `syn`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use apidoc_schema::{
//!     AlternateTypeProvider, DefaultTypeNameExtractor, DocumentationType, FieldPropertyProvider,
//!     MapperConfig, ModelContext, ModelPropertiesProvider,
//! };
//!
//! let provider = FieldPropertyProvider::new(fields, metadata, Arc::new(DefaultTypeNameExtractor::default()));
//! provider.on_mapper_configured(MapperConfig::default())?;
//!
//! let alternates = AlternateTypeProvider::new();
//! let ctx = ModelContext::return_value(&order, DocumentationType::OpenApi3, &alternates);
//! for property in provider.derive_properties(&order, &ctx)? {
//!     println!("{}: {:?}", property.name(), property.model_ref());
//! }
//! ```
//!
//! ## Model References
//!
//! | Field type | Model reference |
//! |------------|-----------------|
//! | `Vec<Widget>` | `Container { kind: List, item_type: "Widget" }` |
//! | `HashSet<Widget>` | `Container { kind: Set, item_type: "Widget" }` |
//! | `HashMap<String, Widget>` | `Map { value_type: "Widget" }` |
//! | anything else | `Scalar { type_name }` |

pub mod allowable;
pub mod collections;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod metadata;
pub mod naming;
pub mod plugin;
pub mod property;
pub mod provider;
pub mod type_name;
pub mod types;

pub use allowable::AllowableValues;
pub use config::MapperConfig;
pub use context::{Direction, DocumentationType, ModelContext};
pub use error::{DeriveError, DeriveResult};
pub use field::{FieldAnnotations, FieldDescriptor, FieldEnumerator, RawMember};
pub use metadata::{BeanDescription, BeanMetadataSource, MemberKind, PropertyMetadata};
pub use naming::{MetadataNamingStrategy, NamingStrategy, RenameNamingStrategy, RenameRule};
pub use plugin::{PluginChain, PluginError, PropertyContext, PropertyPluginFn};
pub use property::{ModelProperty, ModelPropertyBuilder, ModelRef};
pub use provider::{find_name_collisions, FieldPropertyProvider, ModelPropertiesProvider};
pub use type_name::{DefaultTypeNameExtractor, GenericNaming, TypeNameExtractor};
pub use types::{AlternateTypeProvider, AlternateTypeRule, ContainerKind, ResolvedType, TypeShape};

#[cfg(test)]
mod tests;
