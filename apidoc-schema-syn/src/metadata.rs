//! Bean metadata derived from serde attributes.

use std::sync::Arc;

use apidoc_schema::{
    BeanDescription, BeanMetadataSource, Direction, MapperConfig, PropertyMetadata, ResolvedType,
};
use tracing::trace;

use crate::catalog::{FieldDefinition, TypeCatalog, TypeDefinition};

/// Reports property names and visibility the way serde would.
///
/// For each direction a field is included unless serde skips it, and is
/// named by its `rename` attribute, else by the container's `rename_all`
/// rule, else by the mapper's naming rule, else by its declared name.
#[derive(Debug, Clone)]
pub struct SerdeMetadataSource {
    catalog: Arc<TypeCatalog>,
}

impl SerdeMetadataSource {
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }

    fn property(
        definition: &TypeDefinition,
        field: &FieldDefinition,
        direction: Direction,
        config: &MapperConfig,
    ) -> PropertyMetadata {
        let included = if direction.is_serialization() {
            field.serde.serialized(config.include_skipped_if)
        } else {
            field.serde.deserialized()
        };

        let external_name = |for_serialization: bool| -> String {
            if let Some(name) = field.serde.rename.get(for_serialization) {
                return name.clone();
            }
            match definition.serde.rename_all.get(for_serialization).copied().or(config.naming) {
                Some(rule) => rule.apply_to_field(&field.name),
                None => field.name.clone(),
            }
        };

        let mut metadata = PropertyMetadata::field(field.name.clone(), direction)
            .with_derived_names(external_name(true), external_name(false))
            .with_included(included)
            .with_unwrapped(field.serde.flatten);
        metadata.explicitly_named = !field.serde.rename.is_empty();
        metadata
    }
}

impl BeanMetadataSource for SerdeMetadataSource {
    fn introspect(&self, ty: &ResolvedType, direction: Direction, config: &MapperConfig) -> BeanDescription {
        let description = BeanDescription::new(ty.clone(), direction);
        let Some(definition) = self.catalog.find(ty) else {
            trace!(ty = %ty, "No definition for type");
            return description;
        };

        definition.fields().iter().fold(description, |description, field| {
            description.with_property(Self::property(definition, field, direction, config))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_schema::RenameRule;

    const SOURCE: &str = r#"
        #[serde(rename_all(serialize = "camelCase"))]
        pub struct Account {
            pub account_id: u64,
            #[serde(rename = "mail")]
            pub email_address: String,
            #[serde(skip_serializing)]
            pub password_hash: String,
            #[serde(skip_deserializing)]
            pub created_at: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub nick_name: Option<String>,
            #[serde(flatten)]
            pub profile_info: Profile,
        }

        pub struct Profile {
            pub display_name: String,
        }
    "#;

    fn source() -> SerdeMetadataSource {
        SerdeMetadataSource::new(Arc::new(TypeCatalog::from_source(SOURCE).unwrap()))
    }

    fn describe(ty: &str, direction: Direction, config: &MapperConfig) -> BeanDescription {
        source().introspect(&ResolvedType::object(ty), direction, config)
    }

    #[test]
    fn test_inclusion_per_direction() {
        let config = MapperConfig::default();
        let out = describe("Account", Direction::Serialization, &config);
        let index = out.property_index();
        assert!(!index.contains_key("password_hash"));
        assert!(index.contains_key("created_at"));
        assert!(index.contains_key("nick_name"));

        let input = describe("Account", Direction::Deserialization, &config);
        let index = input.property_index();
        assert!(index.contains_key("password_hash"));
        assert!(!index.contains_key("created_at"));
    }

    #[test]
    fn test_skip_serializing_if_respects_config() {
        let config = MapperConfig::default().with_include_skipped_if(false);
        let out = describe("Account", Direction::Serialization, &config);
        assert!(!out.property_index().contains_key("nick_name"));
    }

    #[test]
    fn test_names_per_direction() {
        let config = MapperConfig::default();
        let out = describe("Account", Direction::Serialization, &config);
        let id = &out.properties[0];

        assert_eq!(id.serialized_name, "accountId");
        assert_eq!(id.deserialized_name, "account_id");
        assert!(!id.explicitly_named);

        let mail = &out.properties[1];
        assert_eq!(mail.name_for(true), "mail");
        assert_eq!(mail.name_for(false), "mail");
        assert!(mail.explicitly_named);
    }

    #[test]
    fn test_mapper_naming_applies_without_rename_all() {
        let config = MapperConfig::default().with_naming(RenameRule::PascalCase);
        let profile = describe("Profile", Direction::Serialization, &config);
        assert_eq!(profile.properties[0].serialized_name, "DisplayName");

        let account = describe("Account", Direction::Deserialization, &config);
        assert_eq!(account.properties[0].deserialized_name, "AccountId");
        assert_eq!(account.properties[0].serialized_name, "accountId");
    }

    #[test]
    fn test_rename_all_keeps_trailing_digits() {
        let catalog = TypeCatalog::from_source(
            r#"
            #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
            pub struct Address {
                pub address_line1: String,
                pub address_line2: String,
            }
        "#,
        )
        .unwrap();
        let source = SerdeMetadataSource::new(Arc::new(catalog));
        let out = source.introspect(
            &ResolvedType::object("Address"),
            Direction::Serialization,
            &MapperConfig::default(),
        );
        let names: Vec<_> = out.properties.iter().map(|p| p.serialized_name.as_str()).collect();
        assert_eq!(names, ["ADDRESS_LINE1", "ADDRESS_LINE2"]);

        let config = MapperConfig::default().with_naming(RenameRule::KebabCase);
        let out = describe("Profile", Direction::Serialization, &config);
        assert_eq!(out.properties[0].serialized_name, "display-name");
    }

    #[test]
    fn test_flatten_marks_unwrapped() {
        let out = describe("Account", Direction::Serialization, &MapperConfig::default());
        let index = out.property_index();
        assert!(index["profile_info"].unwrapped);
        assert!(!index["account_id"].unwrapped);
    }

    #[test]
    fn test_unknown_type_is_empty() {
        let out = describe("Missing", Direction::Serialization, &MapperConfig::default());
        assert!(out.properties.is_empty());
        assert_eq!(out.direction, Direction::Serialization);
    }
}
