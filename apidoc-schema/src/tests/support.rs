//! In-memory field enumerator and metadata source for tests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    AlternateTypeProvider, BeanDescription, BeanMetadataSource, DefaultTypeNameExtractor,
    Direction, DocumentationType, FieldAnnotations, FieldDescriptor, FieldEnumerator,
    FieldPropertyProvider, MapperConfig, MemberKind, ModelContext, ModelProperty,
    ModelPropertiesProvider, PropertyMetadata, RawMember, ResolvedType,
};

/// One declared field of a [`TypeSpec`].
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub ty: ResolvedType,
    pub serialized_name: Option<String>,
    pub deserialized_name: Option<String>,
    pub read_only: bool,
    pub write_only: bool,
    pub unwrapped: bool,
    pub member: Option<MemberKind>,
    pub nullable: bool,
    pub annotations: FieldAnnotations,
}

impl FieldSpec {
    pub fn new(name: &str, ty: ResolvedType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            serialized_name: None,
            deserialized_name: None,
            read_only: false,
            write_only: false,
            unwrapped: false,
            member: Some(MemberKind::Field),
            nullable: false,
            annotations: FieldAnnotations::default(),
        }
    }

    pub fn renamed(mut self, name: &str) -> Self {
        self.serialized_name = Some(name.to_string());
        self.deserialized_name = Some(name.to_string());
        self
    }

    pub fn renamed_for_input(mut self, name: &str) -> Self {
        self.deserialized_name = Some(name.to_string());
        self
    }

    /// Only serialized (response side).
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Only deserialized (request side).
    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    pub fn unwrapped(mut self) -> Self {
        self.unwrapped = true;
        self
    }

    pub fn without_member(mut self) -> Self {
        self.member = None;
        self
    }

    /// Report the property as backed by `kind` instead of a field.
    pub fn backed_by(mut self, kind: MemberKind) -> Self {
        self.member = Some(kind);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn annotated(mut self, annotations: FieldAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Leave the field out of the metadata entirely, as if it had no accessor.
    pub fn hidden_from_metadata(self) -> Self {
        self.read_only().write_only()
    }

    fn metadata(&self, direction: Direction) -> PropertyMetadata {
        let included = match direction {
            Direction::Serialization => !self.write_only,
            Direction::Deserialization => !self.read_only,
        };
        let mut meta = PropertyMetadata::field(&self.name, direction)
            .with_included(included)
            .with_unwrapped(self.unwrapped)
            .with_primary_member(self.member);
        if let Some(name) = &self.serialized_name {
            meta = meta.with_serialized_name(name.as_str());
        }
        if let Some(name) = &self.deserialized_name {
            meta = meta.with_deserialized_name(name.as_str());
        }
        meta
    }
}

/// Declared fields of one type.
#[derive(Debug, Clone, Default)]
pub struct TypeSpec {
    pub fields: Vec<FieldSpec>,
}

impl TypeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// Types keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StaticModel {
    types: HashMap<String, TypeSpec>,
}

impl StaticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: &str, spec: TypeSpec) -> Self {
        self.types.insert(name.to_string(), spec);
        self
    }
}

impl FieldEnumerator for StaticModel {
    fn enumerate_fields(&self, ty: &ResolvedType) -> Vec<FieldDescriptor> {
        let Some(spec) = self.types.get(ty.name()) else {
            return Vec::new();
        };

        spec.fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let member = RawMember::new(ty.clone(), field.name.as_str(), index)
                    .with_nullable(field.nullable)
                    .with_annotations(field.annotations.clone());
                FieldDescriptor::new(field.ty.clone(), member)
            })
            .collect()
    }
}

impl BeanMetadataSource for StaticModel {
    fn introspect(&self, ty: &ResolvedType, direction: Direction, _config: &MapperConfig) -> BeanDescription {
        let mut description = BeanDescription::new(ty.clone(), direction);
        if let Some(spec) = self.types.get(ty.name()) {
            for field in &spec.fields {
                description = description.with_property(field.metadata(direction));
            }
        }
        description
    }
}

/// An unconfigured provider over `model`.
pub fn unconfigured(model: StaticModel) -> FieldPropertyProvider {
    let model = Arc::new(model);
    FieldPropertyProvider::new(
        model.clone(),
        model,
        Arc::new(DefaultTypeNameExtractor::default()),
    )
}

/// A provider over `model` with the default configuration.
pub fn provider(model: StaticModel) -> FieldPropertyProvider {
    unconfigured(model).with_config(MapperConfig::default())
}

pub fn derive(provider: &FieldPropertyProvider, ty: &ResolvedType, direction: Direction) -> Vec<ModelProperty> {
    derive_with(provider, ty, direction, &AlternateTypeProvider::new())
}

pub fn derive_with(
    provider: &FieldPropertyProvider,
    ty: &ResolvedType,
    direction: Direction,
    alternates: &AlternateTypeProvider,
) -> Vec<ModelProperty> {
    let ctx = ModelContext::new(ty, direction, DocumentationType::Swagger2, alternates);
    provider.derive_properties(ty, &ctx).expect("derivation succeeds")
}

pub fn names(properties: &[ModelProperty]) -> Vec<&str> {
    properties.iter().map(|p| p.name()).collect()
}
