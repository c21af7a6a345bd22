//! Gives meaning to [`TypeExpr`]s.
//!
//! Resolution order for a path type:
//! 1. A generic parameter bound by the owning type
//! 2. `Option<T>`, which resolves to `T` and marks the field nullable
//! 3. Transparent wrappers (`Box`, `Arc`, `Rc`, `Cow`, cells and locks)
//! 4. Standard collections, which become containers or maps
//! 5. Types defined in the [`TypeCatalog`]
//! 6. Primitive and well-known scalar types
//! 7. Anything else, as an opaque object

use std::collections::HashMap;

use apidoc_schema::type_name::base_type_name;
use apidoc_schema::{ContainerKind, ResolvedType, TypeShape};

use crate::catalog::TypeCatalog;
use crate::type_expr::TypeExpr;

/// Generic parameter name to the type it is bound to.
pub type Bindings = HashMap<String, ResolvedType>;

const WRAPPERS: &[&str] = &["Box", "Arc", "Rc", "Cow", "Cell", "RefCell", "Mutex", "RwLock"];

const SCALARS: &[&str] = &[
    "NaiveTime", "Time", "Duration", "Url", "PathBuf", "IpAddr", "Ipv4Addr", "Ipv6Addr",
];

/// A resolved field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub ty: ResolvedType,
    /// The declared type was `Option<_>`
    pub nullable: bool,
}

impl Resolution {
    fn required(ty: ResolvedType) -> Self {
        Self { ty, nullable: false }
    }
}

/// Resolves type expressions against a catalog.
///
/// Paths are looked up from the root module unless [`within`](Self::within)
/// names the module the expressions were written in.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    catalog: &'a TypeCatalog,
    module: &'a str,
}

impl<'a> TypeResolver<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog, module: "" }
    }

    /// Resolve paths relative to `module`.
    pub fn within(self, module: &'a str) -> Self {
        Self { module, ..self }
    }

    /// Resolve `expr`, substituting bound generic parameters.
    pub fn resolve(&self, expr: &TypeExpr, bindings: &Bindings) -> Resolution {
        if let Some(bound) = expr.as_bare_ident().and_then(|param| bindings.get(param)) {
            return Resolution::required(bound.clone());
        }

        match expr {
            TypeExpr::Path {
                name,
                qualifier,
                arguments,
            } => self.resolve_path(name, qualifier, arguments, bindings),
            TypeExpr::Array(elem) => Resolution::required(ResolvedType::array(self.resolve_type(elem, bindings))),
            TypeExpr::Tuple(elems) => Resolution::required(
                ResolvedType::object("tuple").with_arguments(
                    elems.iter().map(|e| self.resolve_type(e, bindings)).collect(),
                ),
            ),
            TypeExpr::Unit => Resolution::required(ResolvedType::primitive("()")),
            TypeExpr::Never => Resolution::required(ResolvedType::primitive("!")),
        }
    }

    /// Resolve `expr`, discarding nullability.
    pub fn resolve_type(&self, expr: &TypeExpr, bindings: &Bindings) -> ResolvedType {
        self.resolve(expr, bindings).ty
    }

    fn resolve_path(
        &self,
        name: &str,
        qualifier: &[String],
        arguments: &[TypeExpr],
        bindings: &Bindings,
    ) -> Resolution {
        let resolved_args = || -> Vec<ResolvedType> {
            arguments.iter().map(|arg| self.resolve_type(arg, bindings)).collect()
        };

        match (name, arguments) {
            ("Option", [inner]) => {
                return Resolution {
                    ty: self.resolve_type(inner, bindings),
                    nullable: true,
                };
            }
            (wrapper, [inner]) if WRAPPERS.contains(&wrapper) => return self.resolve(inner, bindings),
            _ => {}
        }

        let container = match name {
            "Vec" | "VecDeque" | "LinkedList" | "BinaryHeap" => Some(ContainerKind::List),
            "HashSet" | "BTreeSet" | "IndexSet" => Some(ContainerKind::Set),
            _ => None,
        };
        if let Some(kind) = container {
            let ty = ResolvedType::new(name, TypeShape::Container(kind)).with_arguments(resolved_args());
            return Resolution::required(ty);
        }
        if matches!(name, "HashMap" | "BTreeMap" | "IndexMap") {
            return Resolution::required(ResolvedType::new(name, TypeShape::Map).with_arguments(resolved_args()));
        }

        if let Some(definition) = self.catalog.lookup(name, qualifier, self.module) {
            let shape = if definition.is_enum() {
                TypeShape::Enumeration
            } else {
                TypeShape::Object
            };
            let ty = ResolvedType::new(definition.name.clone(), shape)
                .with_path(definition.module_path.clone())
                .with_arguments(resolved_args());
            return Resolution::required(ty);
        }

        if base_type_name(name).is_some() || SCALARS.contains(&name) {
            return Resolution::required(ResolvedType::primitive(name));
        }

        let path = qualifier
            .iter()
            .map(String::as_str)
            .skip_while(|segment| matches!(*segment, "crate" | "self" | "super"))
            .collect::<Vec<_>>()
            .join("::");
        Resolution::required(
            ResolvedType::object(name)
                .with_path(path)
                .with_arguments(resolved_args()),
        )
    }
}
