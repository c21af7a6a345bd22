//! Model context threaded through property derivation.

use serde::{Deserialize, Serialize};

use crate::types::{AlternateTypeProvider, ResolvedType};

/// Whether a type is documented as data produced or data accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The type is a response or return value and is serialized out.
    Serialization,
    /// The type is a request or input parameter and is deserialized in.
    Deserialization,
}

impl Direction {
    pub fn from_return_type(is_return_type: bool) -> Self {
        if is_return_type {
            Self::Serialization
        } else {
            Self::Deserialization
        }
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization)
    }
}

/// Documentation format being generated.
///
/// Plugins may be registered for a single documentation type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentationType {
    Swagger12,
    #[default]
    Swagger2,
    OpenApi3,
}

/// The type being documented together with how and why it is documented.
///
/// A child context is always derived from its parent with
/// [`ModelContext::from_parent`]. It inherits the direction, the documentation
/// type and the alternate type table, and adds one level of nesting. Contexts
/// borrow their parent, so a chain is acyclic and lives on the stack of the
/// derivation that built it.
#[derive(Debug, Clone, Copy)]
pub struct ModelContext<'a> {
    subject: &'a ResolvedType,
    direction: Direction,
    documentation_type: DocumentationType,
    alternates: &'a AlternateTypeProvider,
    parent: Option<&'a ModelContext<'a>>,
}

impl<'a> ModelContext<'a> {
    /// Create a root context.
    pub fn new(
        subject: &'a ResolvedType,
        direction: Direction,
        documentation_type: DocumentationType,
        alternates: &'a AlternateTypeProvider,
    ) -> Self {
        Self {
            subject,
            direction,
            documentation_type,
            alternates,
            parent: None,
        }
    }

    /// Root context for a type returned to the caller.
    pub fn return_value(
        subject: &'a ResolvedType,
        documentation_type: DocumentationType,
        alternates: &'a AlternateTypeProvider,
    ) -> Self {
        Self::new(subject, Direction::Serialization, documentation_type, alternates)
    }

    /// Root context for a type accepted as input.
    pub fn input_param(
        subject: &'a ResolvedType,
        documentation_type: DocumentationType,
        alternates: &'a AlternateTypeProvider,
    ) -> Self {
        Self::new(subject, Direction::Deserialization, documentation_type, alternates)
    }

    /// Derive a context for a nested type.
    pub fn from_parent(&'a self, subject: &'a ResolvedType) -> ModelContext<'a> {
        ModelContext {
            subject,
            direction: self.direction,
            documentation_type: self.documentation_type,
            alternates: self.alternates,
            parent: Some(self),
        }
    }

    pub fn subject(&self) -> &'a ResolvedType {
        self.subject
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_return_type(&self) -> bool {
        self.direction.is_serialization()
    }

    pub fn documentation_type(&self) -> DocumentationType {
        self.documentation_type
    }

    pub fn alternates(&self) -> &'a AlternateTypeProvider {
        self.alternates
    }

    pub fn parent(&self) -> Option<&'a ModelContext<'a>> {
        self.parent
    }

    /// Number of ancestors; a root context has depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Iterate over the parents of this context, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a ModelContext<'a>> {
        std::iter::successors(self.parent, |ctx| ctx.parent)
    }

    /// Apply the alternate type table to `ty`.
    pub fn alternate_for(&self, ty: &ResolvedType) -> ResolvedType {
        self.alternates.alternate_for(ty)
    }
}
