//! Bean metadata: the serialization view of a type's properties.
//!
//! A [`BeanMetadataSource`] decides, per direction, which fields are
//! properties at all and what they are called on the wire. The deriver only
//! reads this information; it never changes it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::MapperConfig;
use crate::context::Direction;
use crate::types::ResolvedType;

/// Member that primarily backs a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Getter,
    Setter,
    ConstructorParameter,
}

/// Serialization metadata for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    /// Field name as declared
    pub internal_name: String,
    /// Name written when serializing
    pub serialized_name: String,
    /// Name read when deserializing
    pub deserialized_name: String,
    /// The name was set explicitly rather than derived
    pub explicitly_named: bool,
    /// Direction this metadata was introspected for
    pub direction: Direction,
    /// The property takes part in this direction
    pub included: bool,
    /// The property's own fields are inlined into its owner
    pub unwrapped: bool,
    /// Backing member, if any was resolved
    pub primary_member: Option<MemberKind>,
}

impl PropertyMetadata {
    /// Metadata for a plain field whose external names equal its internal name.
    pub fn field(name: impl Into<String>, direction: Direction) -> Self {
        let name = name.into();
        Self {
            serialized_name: name.clone(),
            deserialized_name: name.clone(),
            internal_name: name,
            explicitly_named: false,
            direction,
            included: true,
            unwrapped: false,
            primary_member: Some(MemberKind::Field),
        }
    }

    /// Set both external names, marking the property as explicitly named.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.serialized_name = name.clone();
        self.deserialized_name = name;
        self.explicitly_named = true;
        self
    }

    /// Set the external names without marking them as explicit.
    pub fn with_derived_names(mut self, serialized: impl Into<String>, deserialized: impl Into<String>) -> Self {
        self.serialized_name = serialized.into();
        self.deserialized_name = deserialized.into();
        self
    }

    pub fn with_serialized_name(mut self, name: impl Into<String>) -> Self {
        self.serialized_name = name.into();
        self.explicitly_named = true;
        self
    }

    pub fn with_deserialized_name(mut self, name: impl Into<String>) -> Self {
        self.deserialized_name = name.into();
        self.explicitly_named = true;
        self
    }

    pub fn with_included(mut self, included: bool) -> Self {
        self.included = included;
        self
    }

    pub fn with_unwrapped(mut self, unwrapped: bool) -> Self {
        self.unwrapped = unwrapped;
        self
    }

    pub fn with_primary_member(mut self, member: Option<MemberKind>) -> Self {
        self.primary_member = member;
        self
    }

    /// External name for the requested direction.
    pub fn name_for(&self, for_serialization: bool) -> &str {
        if for_serialization {
            &self.serialized_name
        } else {
            &self.deserialized_name
        }
    }
}

/// All property metadata of a type for one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanDescription {
    pub ty: ResolvedType,
    pub direction: Direction,
    pub properties: Vec<PropertyMetadata>,
}

impl BeanDescription {
    pub fn new(ty: ResolvedType, direction: Direction) -> Self {
        Self {
            ty,
            direction,
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }

    /// Included properties keyed by internal name.
    ///
    /// When two entries share an internal name the first one is kept.
    pub fn property_index(&self) -> HashMap<&str, &PropertyMetadata> {
        let mut index = HashMap::with_capacity(self.properties.len());
        for property in self.properties.iter().filter(|p| p.included) {
            index.entry(property.internal_name.as_str()).or_insert(property);
        }
        index
    }
}

/// Introspects a type's serialization metadata.
pub trait BeanMetadataSource: Send + Sync {
    /// Describe the properties of `ty` as seen in `direction`.
    ///
    /// Unknown types yield an empty description.
    fn introspect(&self, ty: &ResolvedType, direction: Direction, config: &MapperConfig) -> BeanDescription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_skips_excluded() {
        let desc = BeanDescription::new(ResolvedType::object("User"), Direction::Serialization)
            .with_property(PropertyMetadata::field("id", Direction::Serialization))
            .with_property(
                PropertyMetadata::field("password", Direction::Serialization).with_included(false),
            );

        let index = desc.property_index();
        assert_eq!(index.len(), 1);
        assert!(index.contains_key("id"));
        assert!(!index.contains_key("password"));
    }

    #[test]
    fn test_index_first_duplicate_wins() {
        let desc = BeanDescription::new(ResolvedType::object("User"), Direction::Serialization)
            .with_property(PropertyMetadata::field("id", Direction::Serialization).with_name("first"))
            .with_property(PropertyMetadata::field("id", Direction::Serialization).with_name("second"));

        assert_eq!(desc.property_index()["id"].serialized_name, "first");
    }

    #[test]
    fn test_name_for_direction() {
        let meta = PropertyMetadata::field("user_id", Direction::Serialization)
            .with_serialized_name("userId")
            .with_deserialized_name("user");

        assert_eq!(meta.name_for(true), "userId");
        assert_eq!(meta.name_for(false), "user");
        assert!(meta.explicitly_named);
    }
}
