//! Field descriptors reported by a [`FieldEnumerator`].

use serde::{Deserialize, Serialize};

use crate::allowable::AllowableValues;
use crate::types::ResolvedType;

/// Documentation annotations carried by a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAnnotations {
    /// The field must be present
    #[serde(default)]
    pub required: bool,
    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Values the field may take
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowable_values: Option<AllowableValues>,
    /// Example value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Hide the property from rendered documentation
    #[serde(default)]
    pub hidden: bool,
}

impl FieldAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_allowable_values(mut self, values: AllowableValues) -> Self {
        self.allowable_values = Some(values);
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Handle to the declared member backing a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMember {
    /// Type that declares the member
    pub declaring_type: ResolvedType,
    /// Member name as declared
    pub name: String,
    /// Declaration ordinal on the declaring type
    pub index: usize,
    /// The declared type was optional
    pub nullable: bool,
    /// Documentation annotations
    pub annotations: FieldAnnotations,
}

impl RawMember {
    pub fn new(declaring_type: ResolvedType, name: impl Into<String>, index: usize) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            index,
            nullable: false,
            annotations: FieldAnnotations::default(),
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_annotations(mut self, annotations: FieldAnnotations) -> Self {
        self.annotations = annotations;
        self
    }
}

/// A declared field paired with its resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: ResolvedType,
    pub member: RawMember,
}

impl FieldDescriptor {
    pub fn new(ty: ResolvedType, member: RawMember) -> Self {
        Self {
            name: member.name.clone(),
            ty,
            member,
        }
    }

    /// Declaration ordinal on the owning type.
    pub fn position(&self) -> usize {
        self.member.index
    }
}

/// Lists the declared fields of a resolved type.
///
/// Fields must be returned in declaration order. Types without fields, and
/// types the enumerator does not know, yield an empty list.
pub trait FieldEnumerator: Send + Sync {
    fn enumerate_fields(&self, ty: &ResolvedType) -> Vec<FieldDescriptor>;
}
