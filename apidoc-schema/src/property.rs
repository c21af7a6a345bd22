//! Model properties, the output of property derivation.

use serde::{Deserialize, Serialize};

use crate::allowable::AllowableValues;
use crate::error::{DeriveError, DeriveResult};
use crate::types::{ContainerKind, ResolvedType};

/// Compact reference to a property's type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "ref", rename_all = "snake_case")]
pub enum ModelRef {
    /// A single value of the named type
    Scalar { type_name: String },
    /// A sequence of the named element type
    Container { kind: ContainerKind, item_type: String },
    /// A map whose values have the named type; keys are not documented
    Map { value_type: String },
}

impl ModelRef {
    pub fn scalar(type_name: impl Into<String>) -> Self {
        Self::Scalar {
            type_name: type_name.into(),
        }
    }

    pub fn container(kind: ContainerKind, item_type: impl Into<String>) -> Self {
        Self::Container {
            kind,
            item_type: item_type.into(),
        }
    }

    pub fn map(value_type: impl Into<String>) -> Self {
        Self::Map {
            value_type: value_type.into(),
        }
    }

    /// The type name this reference points at: the scalar type, the element
    /// type or the map value type.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Scalar { type_name } => type_name,
            Self::Container { item_type, .. } => item_type,
            Self::Map { value_type } => value_type,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Container { .. })
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map { .. })
    }
}

/// A documentable property of a model.
///
/// Instances are immutable and only created through [`ModelPropertyBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelProperty {
    name: String,
    #[serde(rename = "type")]
    ty: ResolvedType,
    qualified_type: String,
    position: usize,
    required: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowable_values: Option<AllowableValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<String>,
    hidden: bool,
    model_ref: ModelRef,
}

impl ModelProperty {
    pub fn builder() -> ModelPropertyBuilder {
        ModelPropertyBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type of the field.
    pub fn ty(&self) -> &ResolvedType {
        &self.ty
    }

    /// Fully qualified identity of the documented type.
    pub fn qualified_type(&self) -> &str {
        &self.qualified_type
    }

    /// Declaration ordinal of the field on the type that declares it.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Description, empty when none was given.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn allowable_values(&self) -> Option<&AllowableValues> {
        self.allowable_values.as_ref()
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn model_ref(&self) -> &ModelRef {
        &self.model_ref
    }

    /// Turn the property back into a builder.
    pub fn to_builder(&self) -> ModelPropertyBuilder {
        ModelPropertyBuilder {
            name: Some(self.name.clone()),
            ty: Some(self.ty.clone()),
            qualified_type: Some(self.qualified_type.clone()),
            position: self.position,
            required: self.required,
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            allowable_values: self.allowable_values.clone(),
            example: self.example.clone(),
            hidden: self.hidden,
            model_ref: Some(self.model_ref.clone()),
        }
    }
}

/// Fluent builder for [`ModelProperty`].
///
/// Post-processing plugins receive and return the builder, so every
/// attribute can be read back and replaced before the property is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPropertyBuilder {
    name: Option<String>,
    ty: Option<ResolvedType>,
    qualified_type: Option<String>,
    position: usize,
    required: bool,
    description: Option<String>,
    allowable_values: Option<AllowableValues>,
    example: Option<String>,
    hidden: bool,
    model_ref: Option<ModelRef>,
}

impl ModelPropertyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, ty: ResolvedType) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_qualified_type(mut self, qualified_type: impl Into<String>) -> Self {
        self.qualified_type = Some(qualified_type.into());
        self
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_allowable_values(mut self, values: Option<AllowableValues>) -> Self {
        self.allowable_values = values;
        self
    }

    pub fn with_example(mut self, example: Option<String>) -> Self {
        self.example = example;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_model_ref(mut self, model_ref: ModelRef) -> Self {
        self.model_ref = Some(model_ref);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ty(&self) -> Option<&ResolvedType> {
        self.ty.as_ref()
    }

    pub fn qualified_type(&self) -> Option<&str> {
        self.qualified_type.as_deref()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn allowable_values(&self) -> Option<&AllowableValues> {
        self.allowable_values.as_ref()
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn model_ref(&self) -> Option<&ModelRef> {
        self.model_ref.as_ref()
    }

    /// Finalize the property.
    ///
    /// Fails with [`DeriveError::IncompleteProperty`] when the name, the type
    /// or the model reference was never set. A missing qualified type falls
    /// back to the type's erased name.
    pub fn build(self) -> DeriveResult<ModelProperty> {
        let name = self
            .name
            .ok_or(DeriveError::IncompleteProperty { missing: "name" })?;
        let ty = self
            .ty
            .ok_or(DeriveError::IncompleteProperty { missing: "type" })?;
        let model_ref = self
            .model_ref
            .ok_or(DeriveError::IncompleteProperty { missing: "model_ref" })?;
        let qualified_type = self.qualified_type.unwrap_or_else(|| ty.erased_name());

        Ok(ModelProperty {
            name,
            ty,
            qualified_type,
            position: self.position,
            required: self.required,
            description: self.description.unwrap_or_default(),
            allowable_values: self.allowable_values,
            example: self.example,
            hidden: self.hidden,
            model_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ModelPropertyBuilder {
        ModelProperty::builder()
            .with_name("id")
            .with_type(ResolvedType::primitive("u64"))
            .with_model_ref(ModelRef::scalar("long"))
    }

    #[test]
    fn test_build_defaults() {
        let prop = complete().build().unwrap();
        assert_eq!(prop.name(), "id");
        assert_eq!(prop.qualified_type(), "u64");
        assert_eq!(prop.description(), "");
        assert!(!prop.is_required());
        assert_eq!(prop.allowable_values(), None);
    }

    #[test]
    fn test_build_requires_name_type_and_ref() {
        let err = ModelPropertyBuilder::new().build().unwrap_err();
        assert!(matches!(err, DeriveError::IncompleteProperty { missing: "name" }));

        let err = ModelPropertyBuilder::new().with_name("x").build().unwrap_err();
        assert!(matches!(err, DeriveError::IncompleteProperty { missing: "type" }));

        let err = ModelPropertyBuilder::new()
            .with_name("x")
            .with_type(ResolvedType::primitive("u8"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DeriveError::IncompleteProperty { missing: "model_ref" }));
    }

    #[test]
    fn test_to_builder_preserves_attributes() {
        let prop = complete()
            .with_description(Some("Identifier".into()))
            .with_required(true)
            .with_position(3)
            .build()
            .unwrap();

        assert_eq!(prop.to_builder().build().unwrap(), prop);
    }

    #[test]
    fn test_serialized_form() {
        let prop = complete()
            .with_model_ref(ModelRef::container(ContainerKind::List, "Widget"))
            .build()
            .unwrap();
        let json = serde_json::to_value(&prop).unwrap();

        assert_eq!(json["name"], "id");
        assert_eq!(json["qualified_type"], "u64");
        assert_eq!(
            json["model_ref"],
            serde_json::json!({"ref": "container", "kind": "List", "item_type": "Widget"})
        );
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_model_ref_type_name() {
        assert_eq!(ModelRef::map("Widget").type_name(), "Widget");
        assert!(ModelRef::map("Widget").is_map());
        assert!(!ModelRef::scalar("string").is_collection());
    }
}
