//! Field enumeration over catalog definitions.

use std::sync::Arc;

use apidoc_schema::{FieldDescriptor, FieldEnumerator, RawMember, ResolvedType, TypeShape};

use crate::catalog::TypeCatalog;
use crate::resolver::TypeResolver;

/// Lists the named fields of catalog structs.
///
/// Generic parameters of the definition are bound to the arguments of the
/// requested type, so the fields of `Page<Widget>` resolve `T` to `Widget`.
/// Field types are resolved from the module the definition lives in. Fields
/// of an enumeration type that carry no explicit allowable values are given
/// the enum's serialized variant names.
#[derive(Debug, Clone)]
pub struct SynFieldEnumerator {
    catalog: Arc<TypeCatalog>,
}

impl SynFieldEnumerator {
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }
}

impl FieldEnumerator for SynFieldEnumerator {
    fn enumerate_fields(&self, ty: &ResolvedType) -> Vec<FieldDescriptor> {
        let Some(definition) = self.catalog.find(ty) else {
            return Vec::new();
        };

        let bindings = definition.bindings(ty.arguments());
        let resolver = TypeResolver::new(&self.catalog).within(&definition.module_path);

        definition
            .fields()
            .iter()
            .map(|field| {
                let resolution = resolver.resolve(&field.ty, &bindings);

                let mut annotations = field.annotations.clone();
                if annotations.allowable_values.is_none() && resolution.ty.shape() == TypeShape::Enumeration {
                    annotations.allowable_values = self
                        .catalog
                        .find(&resolution.ty)
                        .and_then(|enumeration| enumeration.variant_values());
                }

                let member = RawMember::new(ty.clone(), field.name.clone(), field.index)
                    .with_nullable(resolution.nullable)
                    .with_annotations(annotations);
                FieldDescriptor::new(resolution.ty, member)
            })
            .collect()
    }
}
