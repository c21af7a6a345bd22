//! Resolved type handles and alternate type substitution.
//!
//! A [`ResolvedType`] is the fully parameterized description of a type as
//! produced by a type resolver: its name, the module path that qualifies it,
//! its structural [`TypeShape`] and its type arguments. Classification of
//! container and map types is driven by the shape and the argument arity,
//! never by the type's name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of sequence a container type represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    /// Ordered sequence (Rust: `Vec`, `VecDeque`, `LinkedList`)
    List,
    /// Unordered collection of unique elements (Rust: `HashSet`, `BTreeSet`)
    Set,
    /// Fixed-size array or slice
    Array,
}

impl ContainerKind {
    /// Returns the documentation name of the container kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Set => "Set",
            Self::Array => "Array",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural shape of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", content = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// Built-in value type (strings, numbers, booleans, timestamps)
    Primitive,
    /// User-defined type with fields of its own
    Object,
    /// Enum documented through its variant names
    Enumeration,
    /// Sequence-like type with a single element type argument
    Container(ContainerKind),
    /// Key/value type with key and value type arguments
    Map,
    /// Placeholder matching any type in an alternate type rule
    Wildcard,
}

/// A fully parameterized type reference.
///
/// Equality and hashing are structural: two handles are equal when their
/// names, paths, shapes and arguments are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedType {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,

    shape: TypeShape,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<ResolvedType>,
}

impl ResolvedType {
    /// Create a type with the given name and shape and no arguments.
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            path: None,
            shape,
            arguments: Vec::new(),
        }
    }

    /// Create a primitive type such as `String` or `u64`.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Primitive)
    }

    /// Create a user-defined object type.
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Object)
    }

    /// Create an enumeration type.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Enumeration)
    }

    /// Create a container type with a single element argument.
    pub fn container(name: impl Into<String>, kind: ContainerKind, element: ResolvedType) -> Self {
        Self::new(name, TypeShape::Container(kind)).with_arguments(vec![element])
    }

    /// `Vec<element>`
    pub fn list(element: ResolvedType) -> Self {
        Self::container("Vec", ContainerKind::List, element)
    }

    /// `HashSet<element>`
    pub fn set(element: ResolvedType) -> Self {
        Self::container("HashSet", ContainerKind::Set, element)
    }

    /// `[element]`
    pub fn array(element: ResolvedType) -> Self {
        Self::container("array", ContainerKind::Array, element)
    }

    /// `HashMap<key, value>`
    pub fn map(key: ResolvedType, value: ResolvedType) -> Self {
        Self::new("HashMap", TypeShape::Map).with_arguments(vec![key, value])
    }

    /// A wildcard that matches any type inside an [`AlternateTypeRule`].
    pub fn wildcard() -> Self {
        Self::new("?", TypeShape::Wildcard)
    }

    /// Set the module path qualifying this type.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.is_empty() { None } else { Some(path) };
        self
    }

    /// Replace the type arguments.
    pub fn with_arguments(mut self, arguments: Vec<ResolvedType>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Simple (unqualified) name of the type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module path qualifying the type, if known.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    pub fn arguments(&self) -> &[ResolvedType] {
        &self.arguments
    }

    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    pub fn is_wildcard(&self) -> bool {
        self.shape == TypeShape::Wildcard
    }

    /// The raw type identity with all type arguments erased.
    pub fn erased_name(&self) -> String {
        match &self.path {
            Some(path) => format!("{path}::{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Check whether this type, used as a pattern, matches `other`.
    ///
    /// Wildcards match any type at their position.
    pub fn matches(&self, other: &ResolvedType) -> bool {
        self.capture(other, &mut Vec::new())
    }

    /// Match against `other`, recording the types bound to each wildcard in
    /// depth-first order.
    fn capture(&self, other: &ResolvedType, captured: &mut Vec<ResolvedType>) -> bool {
        if self.is_wildcard() {
            captured.push(other.clone());
            return true;
        }

        self.name == other.name
            && self.path == other.path
            && self.shape == other.shape
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(pattern, arg)| pattern.capture(arg, captured))
    }

    /// Replace wildcards in this type with captured types, in order.
    fn substitute(&self, captured: &mut impl Iterator<Item = ResolvedType>) -> ResolvedType {
        if self.is_wildcard() {
            return captured.next().unwrap_or_else(|| self.clone());
        }

        let arguments = self
            .arguments
            .iter()
            .map(|arg| arg.substitute(captured))
            .collect();
        self.clone().with_arguments(arguments)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.erased_name())?;
        if let Some((first, rest)) = self.arguments.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// A substitution rule documenting one type as another.
///
/// Wildcards in `original` capture the types at their position; wildcards in
/// `alternate` are replaced by the captured types in the same order. The rule
/// `Wrapper<?> -> ?` therefore documents `Wrapper<Widget>` as `Widget`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateTypeRule {
    pub original: ResolvedType,
    pub alternate: ResolvedType,
}

impl AlternateTypeRule {
    pub fn new(original: ResolvedType, alternate: ResolvedType) -> Self {
        Self {
            original,
            alternate,
        }
    }

    /// Check whether this rule applies to the given type.
    pub fn applies_to(&self, ty: &ResolvedType) -> bool {
        self.original.matches(ty)
    }

    /// Apply the rule, returning `None` when it does not match.
    pub fn alternate_for(&self, ty: &ResolvedType) -> Option<ResolvedType> {
        let mut captured = Vec::new();
        if !self.original.capture(ty, &mut captured) {
            return None;
        }
        Some(self.alternate.substitute(&mut captured.into_iter()))
    }
}

/// Ordered table of alternate type rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateTypeProvider {
    rules: Vec<AlternateTypeRule>,
}

impl AlternateTypeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Rules registered earlier take precedence.
    pub fn with_rule(mut self, rule: AlternateTypeRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rule(&mut self, rule: AlternateTypeRule) {
        self.rules.push(rule);
    }

    /// The alternate for `ty` given by the first matching rule, or `ty` itself.
    pub fn alternate_for(&self, ty: &ResolvedType) -> ResolvedType {
        self.rules
            .iter()
            .find_map(|rule| rule.alternate_for(ty))
            .unwrap_or_else(|| ty.clone())
    }

    pub fn rules(&self) -> &[AlternateTypeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
