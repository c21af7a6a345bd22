//! Catalog of type definitions parsed from Rust source.
//!
//! The catalog is the reflection data for the adapter: each struct and enum
//! is recorded with its generic parameters, its serde configuration and, for
//! structs, every named field in declaration order. Definitions are keyed by
//! their module path and name (`shop::models::Widget`); inline `mod` blocks
//! extend the module path of the items they contain.

use std::collections::HashMap;

use apidoc_schema::{AllowableValues, FieldAnnotations, RenameRule, ResolvedType};
use darling::FromField;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Item};
use tracing::debug;

use crate::attributes::{extract_doc_comments, ApiFieldAttrs};
use crate::error::{CatalogError, CatalogResult};
use crate::resolver::{Bindings, TypeResolver};
use crate::serde_compat::{SerdeContainerAttrs, SerdeFieldAttrs, SerdeVariantAttrs};
use crate::type_expr::{TypeExpr, TypeExprParser};

/// A named struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field name with any raw identifier prefix removed
    pub name: String,
    /// Declaration ordinal
    pub index: usize,
    /// Declared type
    pub ty: TypeExpr,
    pub serde: SerdeFieldAttrs,
    pub annotations: FieldAnnotations,
}

/// An enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDefinition {
    pub name: String,
    pub serde: SerdeVariantAttrs,
}

impl VariantDefinition {
    /// Name the variant is serialized under.
    pub fn serialized_name(&self, rename_all: Option<RenameRule>) -> String {
        if let Some(name) = self.serde.rename.get(true) {
            return name.clone();
        }
        match rename_all {
            Some(rule) => rule.apply_to_variant(&self.name),
            None => self.name.clone(),
        }
    }
}

/// Shape-specific part of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionKind {
    /// Struct with named fields
    Struct(Vec<FieldDefinition>),
    /// Tuple struct with the given number of fields
    TupleStruct(usize),
    UnitStruct,
    Enum(Vec<VariantDefinition>),
}

/// A struct or enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    /// Module path, empty for the root module
    pub module_path: String,
    /// Generic type parameter names, in order
    pub generics: Vec<String>,
    pub serde: SerdeContainerAttrs,
    pub kind: DefinitionKind,
}

impl TypeDefinition {
    /// Parse a definition from derive input.
    pub fn from_derive_input(input: &DeriveInput, module_path: &str) -> CatalogResult<Self> {
        let name = input.ident.unraw().to_string();
        let serde = SerdeContainerAttrs::from_attrs(&input.attrs)
            .map_err(|e| CatalogError::attributes(&name, e))?;
        let generics = input
            .generics
            .type_params()
            .map(|param| param.ident.to_string())
            .collect();

        let kind = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => DefinitionKind::Struct(
                    named
                        .named
                        .iter()
                        .enumerate()
                        .filter_map(|(index, field)| {
                            let ident = field.ident.as_ref()?;
                            Some(parse_field(&name, index, ident, field))
                        })
                        .collect::<CatalogResult<Vec<_>>>()?,
                ),
                Fields::Unnamed(unnamed) => DefinitionKind::TupleStruct(unnamed.unnamed.len()),
                Fields::Unit => DefinitionKind::UnitStruct,
            },
            Data::Enum(data) => DefinitionKind::Enum(
                data.variants
                    .iter()
                    .map(|variant| {
                        Ok(VariantDefinition {
                            name: variant.ident.unraw().to_string(),
                            serde: SerdeVariantAttrs::from_attrs(&variant.attrs)
                                .map_err(|e| CatalogError::attributes(&name, e))?,
                        })
                    })
                    .collect::<CatalogResult<Vec<_>>>()?,
            ),
            Data::Union(_) => {
                return Err(CatalogError::attributes(&name, "unions are not supported"));
            }
        };

        Ok(Self {
            name,
            module_path: module_path.to_string(),
            generics,
            serde,
            kind,
        })
    }

    /// `module::path::Name`, or the bare name in the root module.
    pub fn qualified_name(&self) -> String {
        if self.module_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module_path, self.name)
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, DefinitionKind::Enum(_))
    }

    /// Named fields, empty for anything but a struct with named fields.
    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.kind {
            DefinitionKind::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Bind this definition's generic parameters to the arguments of `ty`.
    pub fn bindings(&self, arguments: &[ResolvedType]) -> Bindings {
        self.generics
            .iter()
            .cloned()
            .zip(arguments.iter().cloned())
            .collect()
    }

    /// Serialized names of the variants of an enum, skipped variants excluded.
    pub fn variant_values(&self) -> Option<AllowableValues> {
        let DefinitionKind::Enum(variants) = &self.kind else {
            return None;
        };
        let rename_all = self.serde.rename_all.get(true).copied();
        let values: Vec<String> = variants
            .iter()
            .filter(|variant| !variant.serde.should_skip())
            .map(|variant| variant.serialized_name(rename_all))
            .collect();

        (!values.is_empty()).then(|| AllowableValues::list(values))
    }
}

fn parse_field(
    type_name: &str,
    index: usize,
    ident: &syn::Ident,
    field: &syn::Field,
) -> CatalogResult<FieldDefinition> {
    let name = ident.unraw().to_string();

    let ty = TypeExprParser::parse(&field.ty).map_err(|source| CatalogError::FieldType {
        type_name: type_name.to_string(),
        field: name.clone(),
        source,
    })?;
    let serde = SerdeFieldAttrs::from_attrs(&field.attrs)
        .map_err(|e| CatalogError::attributes(type_name, e))?;
    let api = ApiFieldAttrs::from_field(field).map_err(|e| CatalogError::attributes(type_name, e))?;
    let annotations = api.annotations(extract_doc_comments(&field.attrs));

    Ok(FieldDefinition {
        name,
        index,
        ty,
        serde,
        annotations,
    })
}

/// Struct and enum definitions available for documentation.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    definitions: Vec<TypeDefinition>,
    by_qualified_name: HashMap<String, usize>,
    by_name: HashMap<String, Vec<usize>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from one source file, treated as the root module.
    pub fn from_source(source: &str) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        catalog.add_source(source, "")?;
        Ok(catalog)
    }

    /// Add every struct and enum in `source`, placed under `module_path`.
    pub fn add_source(&mut self, source: &str, module_path: &str) -> CatalogResult<()> {
        let file = syn::parse_file(source)?;
        let before = self.definitions.len();
        self.add_items(&file.items, module_path)?;
        debug!(
            module = %module_path,
            types = self.definitions.len() - before,
            "Loaded source into type catalog"
        );
        Ok(())
    }

    /// Add one definition.
    pub fn add_derive_input(&mut self, input: &DeriveInput, module_path: &str) -> CatalogResult<()> {
        let definition = TypeDefinition::from_derive_input(input, module_path)?;
        self.insert(definition)
    }

    fn add_items(&mut self, items: &[Item], module_path: &str) -> CatalogResult<()> {
        for item in items {
            match item {
                Item::Struct(item) => self.add_derive_input(&DeriveInput::from(item.clone()), module_path)?,
                Item::Enum(item) => self.add_derive_input(&DeriveInput::from(item.clone()), module_path)?,
                Item::Mod(module) => {
                    if let Some((_, items)) = &module.content {
                        let nested = join_path(module_path, &module.ident.unraw().to_string());
                        self.add_items(items, &nested)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn insert(&mut self, definition: TypeDefinition) -> CatalogResult<()> {
        let qualified = definition.qualified_name();
        if self.by_qualified_name.contains_key(&qualified) {
            return Err(CatalogError::DuplicateType(qualified));
        }

        let index = self.definitions.len();
        self.by_qualified_name.insert(qualified, index);
        self.by_name
            .entry(definition.name.clone())
            .or_default()
            .push(index);
        self.definitions.push(definition);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.iter()
    }

    /// Look up a definition by `module::path::Name` or, when unambiguous, by
    /// bare name.
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        if let Some(&index) = self.by_qualified_name.get(name) {
            return Some(&self.definitions[index]);
        }
        match self.by_name.get(name).map(Vec::as_slice) {
            Some([index]) => Some(&self.definitions[*index]),
            _ => None,
        }
    }

    /// Look up the definition for a path as written in source inside
    /// `from_module`.
    ///
    /// The path is first resolved the way the compiler would, relative to
    /// `from_module` with `crate`, `self` and `super` honored. Failing that,
    /// leading `crate`, `self` and `super` segments are ignored and the rest
    /// of the qualifier must be a suffix of the definition's module path.
    /// Among several such candidates the first one loaded wins.
    pub fn lookup(&self, name: &str, qualifier: &[String], from_module: &str) -> Option<&TypeDefinition> {
        let relative = relative_path(from_module, qualifier, name);
        if let Some(&index) = self.by_qualified_name.get(&relative) {
            return Some(&self.definitions[index]);
        }

        let qualifier: Vec<&str> = qualifier
            .iter()
            .map(String::as_str)
            .skip_while(|segment| matches!(*segment, "crate" | "self" | "super"))
            .collect();

        self.by_name
            .get(name)?
            .iter()
            .map(|&index| &self.definitions[index])
            .find(|definition| {
                let module: Vec<&str> = definition
                    .module_path
                    .split("::")
                    .filter(|s| !s.is_empty())
                    .collect();
                module.ends_with(&qualifier)
            })
    }

    /// The definition a resolved type refers to.
    pub fn find(&self, ty: &ResolvedType) -> Option<&TypeDefinition> {
        match ty.path() {
            Some(_) => self
                .by_qualified_name
                .get(&ty.erased_name())
                .map(|&index| &self.definitions[index]),
            None => self.get(ty.name()),
        }
    }

    /// Parse and resolve a type written as Rust syntax, e.g. `"Page<Widget>"`.
    pub fn resolve(&self, type_text: &str) -> CatalogResult<ResolvedType> {
        let expr = TypeExprParser::parse_str(type_text)?;
        Ok(TypeResolver::new(self).resolve(&expr, &Bindings::new()).ty)
    }

    /// Resolve a catalog type by name, failing if it is not in the catalog.
    pub fn resolve_defined(&self, type_text: &str) -> CatalogResult<ResolvedType> {
        let ty = self.resolve(type_text)?;
        match self.find(&ty) {
            Some(_) => Ok(ty),
            None => Err(CatalogError::UnknownType(type_text.to_string())),
        }
    }
}

fn relative_path(from_module: &str, qualifier: &[String], name: &str) -> String {
    let mut segments: Vec<&str> = from_module.split("::").filter(|s| !s.is_empty()).collect();
    for (position, segment) in qualifier.iter().enumerate() {
        match segment.as_str() {
            "crate" if position == 0 => segments.clear(),
            "self" if position == 0 => {}
            "super" => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.push(name);
    segments.join("::")
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}::{child}")
    }
}
