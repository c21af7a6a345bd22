//! Owned type expressions parsed from Rust syntax.
//!
//! `syn` types borrow nothing but are not `Send`, so the catalog converts every
//! field type into a [`TypeExpr`] when it loads a definition. A type expression
//! only records structure: which paths, arrays and tuples appear and with what
//! generic arguments. Meaning (containers, primitives, catalog types) is given
//! to it later by the [`TypeResolver`](crate::TypeResolver).
//!
//! Supported syntax:
//! - Paths with angle-bracketed generic arguments (`Vec<T>`, `std::sync::Arc<T>`)
//! - Fixed-size arrays and slices (`[T; N]`, `[T]`)
//! - Tuples, including the unit type `()`
//! - The never type `!`
//! - References, parenthesized and grouped types (unwrapped)

use std::fmt;

use quote::ToTokens;
use syn::{GenericArgument, Path, PathArguments, Type};

/// Error type for type expression parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Empty path in type")]
    EmptyPath,

    #[error("Invalid type syntax '{text}': {message}")]
    Syntax { text: String, message: String },
}

/// Structural form of a Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A path type such as `Vec<String>` or `crate::models::Widget`
    Path {
        name: String,
        qualifier: Vec<String>,
        arguments: Vec<TypeExpr>,
    },
    /// A fixed-size array or a slice
    Array(Box<TypeExpr>),
    /// A non-empty tuple
    Tuple(Vec<TypeExpr>),
    /// `()`
    Unit,
    /// `!`
    Never,
}

impl TypeExpr {
    /// A path type without qualifier.
    pub fn named(name: impl Into<String>, arguments: Vec<TypeExpr>) -> Self {
        Self::Path {
            name: name.into(),
            qualifier: Vec::new(),
            arguments,
        }
    }

    /// Check whether this is a bare single-segment path with no arguments.
    pub fn as_bare_ident(&self) -> Option<&str> {
        match self {
            Self::Path {
                name,
                qualifier,
                arguments,
            } if qualifier.is_empty() && arguments.is_empty() => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path {
                name,
                qualifier,
                arguments,
            } => {
                for segment in qualifier {
                    write!(f, "{segment}::")?;
                }
                f.write_str(name)?;
                if !arguments.is_empty() {
                    let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            Self::Array(elem) => write!(f, "[{elem}]"),
            Self::Tuple(elems) => {
                let elems: Vec<String> = elems.iter().map(ToString::to_string).collect();
                write!(f, "({})", elems.join(", "))
            }
            Self::Unit => f.write_str("()"),
            Self::Never => f.write_str("!"),
        }
    }
}

/// Parses `syn` types into [`TypeExpr`].
pub struct TypeExprParser;

impl TypeExprParser {
    /// Parse a syn::Type into a TypeExpr.
    pub fn parse(ty: &Type) -> Result<TypeExpr, TypeParseError> {
        match ty {
            Type::Path(type_path) => {
                if type_path.qself.is_some() {
                    return Err(unsupported("Qualified self types", ty));
                }
                Self::parse_path(&type_path.path)
            }
            Type::Reference(type_ref) => Self::parse(&type_ref.elem),
            Type::Array(arr) => Ok(TypeExpr::Array(Box::new(Self::parse(&arr.elem)?))),
            Type::Slice(slice) => Ok(TypeExpr::Array(Box::new(Self::parse(&slice.elem)?))),
            Type::Tuple(tuple) if tuple.elems.is_empty() => Ok(TypeExpr::Unit),
            Type::Tuple(tuple) => {
                let elems = tuple
                    .elems
                    .iter()
                    .map(Self::parse)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeExpr::Tuple(elems))
            }
            Type::Paren(paren) => Self::parse(&paren.elem),
            Type::Group(group) => Self::parse(&group.elem),
            Type::Never(_) => Ok(TypeExpr::Never),
            Type::Ptr(_) => Err(unsupported("Raw pointers", ty)),
            Type::BareFn(_) => Err(unsupported("Function pointers", ty)),
            Type::TraitObject(_) => Err(unsupported("Trait objects", ty)),
            Type::ImplTrait(_) => Err(unsupported("impl Trait", ty)),
            Type::Infer(_) => Err(unsupported("Inferred types", ty)),
            Type::Macro(_) => Err(unsupported("Macro types", ty)),
            _ => Err(unsupported("Type", ty)),
        }
    }

    /// Parse type syntax from a string, such as `"Vec<Widget>"`.
    pub fn parse_str(text: &str) -> Result<TypeExpr, TypeParseError> {
        let ty: Type = syn::parse_str(text).map_err(|e| TypeParseError::Syntax {
            text: text.to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&ty)
    }

    fn parse_path(path: &Path) -> Result<TypeExpr, TypeParseError> {
        let segment = path.segments.last().ok_or(TypeParseError::EmptyPath)?;
        let qualifier = path
            .segments
            .iter()
            .take(path.segments.len() - 1)
            .map(|s| s.ident.to_string())
            .collect();

        Ok(TypeExpr::Path {
            name: segment.ident.to_string(),
            qualifier,
            arguments: Self::parse_generics(&segment.arguments)?,
        })
    }

    fn parse_generics(args: &PathArguments) -> Result<Vec<TypeExpr>, TypeParseError> {
        match args {
            PathArguments::None => Ok(vec![]),
            PathArguments::AngleBracketed(ab) => ab
                .args
                .iter()
                .filter_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(Self::parse(ty)),
                    // Lifetimes, const generics and associated items carry no shape
                    _ => None,
                })
                .collect(),
            PathArguments::Parenthesized(_) => Err(TypeParseError::UnsupportedType("Fn types".into())),
        }
    }
}

fn unsupported(what: &str, ty: &Type) -> TypeParseError {
    TypeParseError::UnsupportedType(format!("{what}: {}", ty.to_token_stream()))
}
