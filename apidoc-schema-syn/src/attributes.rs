//! Documentation attributes: `#[apidoc(...)]` and doc comments.
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `#[apidoc(required)]` | Mark the property as required |
//! | `#[apidoc(description = "...")]` | Description (overrides doc comments) |
//! | `#[apidoc(allowable_values = "a, b")]` | Allowed values, see [`AllowableValues::parse`] |
//! | `#[apidoc(example = "...")]` | Example value |
//! | `#[apidoc(hidden)]` | Hide the property from rendered documentation |

use apidoc_schema::{AllowableValues, FieldAnnotations};
use darling::FromField;
use syn::{Attribute, Expr, Ident, Lit, Meta, Type};

/// Field-level attributes parsed from `#[apidoc(...)]` on struct fields.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(apidoc))]
pub struct ApiFieldAttrs {
    /// Field identifier (None for tuple struct fields)
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// The property must be present
    #[darling(default)]
    pub required: bool,

    /// Property description
    #[darling(default)]
    pub description: Option<String>,

    /// Allowed values, as list or range text
    #[darling(default)]
    pub allowable_values: Option<String>,

    /// Example value
    #[darling(default)]
    pub example: Option<String>,

    /// Hide from rendered documentation
    #[darling(default)]
    pub hidden: bool,
}

impl ApiFieldAttrs {
    /// Build field annotations, falling back to `doc` for the description.
    pub fn annotations(&self, doc: Option<String>) -> FieldAnnotations {
        FieldAnnotations {
            required: self.required,
            description: self.description.clone().or(doc),
            allowable_values: self
                .allowable_values
                .as_deref()
                .and_then(AllowableValues::parse),
            example: self.example.clone(),
            hidden: self.hidden,
        }
    }
}

/// Extract doc comments from attributes.
///
/// Lines are trimmed and joined with newlines; blank results yield `None`.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let doc_lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }

            if let Meta::NameValue(meta) = &attr.meta {
                if let Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value());
                    }
                }
            }
            None
        })
        .collect();

    let description = doc_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if description.is_empty() {
        None
    } else {
        Some(description)
    }
}
