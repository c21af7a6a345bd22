//! Serde attribute parsing.
//!
//! Serde attributes are the serialization configuration of a Rust type: they
//! decide what each field is called on the wire and whether it is written,
//! read or both. Keys this crate does not interpret (`with`, `bound`,
//! `deserialize_with`, ...) are consumed and ignored.

use std::str::FromStr;

use apidoc_schema::RenameRule;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

/// A name or rule that may differ between serialization and deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directional<T> {
    pub serialize: Option<T>,
    pub deserialize: Option<T>,
}

impl<T> Default for Directional<T> {
    fn default() -> Self {
        Self {
            serialize: None,
            deserialize: None,
        }
    }
}

impl<T: Clone> Directional<T> {
    pub fn both(value: T) -> Self {
        Self {
            serialize: Some(value.clone()),
            deserialize: Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.serialize.is_none() && self.deserialize.is_none()
    }

    /// The value for one direction.
    pub fn get(&self, for_serialization: bool) -> Option<&T> {
        if for_serialization {
            self.serialize.as_ref()
        } else {
            self.deserialize.as_ref()
        }
    }
}

/// Serde container attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerdeContainerAttrs {
    /// Rename all fields (or variants) using a case convention
    pub rename_all: Directional<RenameRule>,
}

impl SerdeContainerAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    result.rename_all = parse_directional(&meta, parse_rename_rule)?;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

/// Serde field attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerdeFieldAttrs {
    /// Rename this field
    pub rename: Directional<String>,

    /// Skip this field
    pub skip: bool,

    /// Skip serializing this field
    pub skip_serializing: bool,

    /// Skip deserializing this field
    pub skip_deserializing: bool,

    /// Serialization is skipped when a predicate holds
    pub skip_serializing_if: bool,

    /// Field has a default value
    pub default: bool,

    /// Flatten nested object
    pub flatten: bool,
}

impl SerdeFieldAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = parse_directional(&meta, |lit| Ok(lit.value()))?;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("skip_serializing") {
                    result.skip_serializing = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    result.skip_deserializing = true;
                } else if meta.path.is_ident("skip_serializing_if") {
                    skip_value(&meta)?;
                    result.skip_serializing_if = true;
                } else if meta.path.is_ident("default") {
                    skip_value(&meta)?;
                    result.default = true;
                } else if meta.path.is_ident("flatten") {
                    result.flatten = true;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            })?;
        }

        Ok(result)
    }

    /// Check whether the field is written when serializing.
    pub fn serialized(&self, include_skipped_if: bool) -> bool {
        !(self.skip || self.skip_serializing || (self.skip_serializing_if && !include_skipped_if))
    }

    /// Check whether the field is read when deserializing.
    pub fn deserialized(&self) -> bool {
        !(self.skip || self.skip_deserializing)
    }
}

/// Serde variant attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerdeVariantAttrs {
    /// Rename this variant
    pub rename: Directional<String>,

    /// Skip this variant
    pub skip: bool,

    /// Skip serializing this variant
    pub skip_serializing: bool,

    /// Skip deserializing this variant
    pub skip_deserializing: bool,
}

impl SerdeVariantAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = parse_directional(&meta, |lit| Ok(lit.value()))?;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("skip_serializing") {
                    result.skip_serializing = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    result.skip_deserializing = true;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            })?;
        }

        Ok(result)
    }

    /// Check whether this variant should be skipped entirely.
    pub fn should_skip(&self) -> bool {
        self.skip || (self.skip_serializing && self.skip_deserializing)
    }
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Parse `key = "value"` or `key(serialize = "a", deserialize = "b")`.
fn parse_directional<T: Clone>(
    meta: &ParseNestedMeta,
    parse: impl Fn(&LitStr) -> syn::Result<T>,
) -> syn::Result<Directional<T>> {
    if meta.input.peek(Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        return Ok(Directional::both(parse(&lit)?));
    }

    let mut result = Directional::default();
    meta.parse_nested_meta(|nested| {
        let lit: LitStr = nested.value()?.parse()?;
        if nested.path.is_ident("serialize") {
            result.serialize = Some(parse(&lit)?);
        } else if nested.path.is_ident("deserialize") {
            result.deserialize = Some(parse(&lit)?);
        } else {
            return Err(nested.error("expected `serialize` or `deserialize`"));
        }
        Ok(())
    })?;
    Ok(result)
}

/// Parse a serde rename rule string into a RenameRule.
fn parse_rename_rule(lit: &LitStr) -> syn::Result<RenameRule> {
    RenameRule::from_str(&lit.value()).map_err(|e| syn::Error::new(lit.span(), e))
}

/// Consume the value of a key this crate does not interpret.
fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_value(&nested))?;
    }
    Ok(())
}
