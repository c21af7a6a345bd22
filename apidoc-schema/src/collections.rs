//! Container and map classification.
//!
//! Classification looks only at the shape and argument count of a resolved
//! type. A type that claims a container or map shape but carries the wrong
//! number of type arguments is treated as a scalar.

use crate::context::ModelContext;
use crate::property::ModelRef;
use crate::type_name::TypeNameExtractor;
use crate::types::{ContainerKind, ResolvedType, TypeShape};

/// Sequence-like type with exactly one element type argument.
pub fn is_container_type(ty: &ResolvedType) -> bool {
    matches!(ty.shape(), TypeShape::Container(_)) && ty.arguments().len() == 1
}

/// Kind of a container type, `None` for anything else.
pub fn container_kind(ty: &ResolvedType) -> Option<ContainerKind> {
    match ty.shape() {
        TypeShape::Container(kind) if is_container_type(ty) => Some(kind),
        _ => None,
    }
}

/// Element type of a container type.
pub fn container_element_type(ty: &ResolvedType) -> Option<&ResolvedType> {
    is_container_type(ty).then(|| &ty.arguments()[0])
}

/// Key/value type with exactly two type arguments.
pub fn is_map_type(ty: &ResolvedType) -> bool {
    ty.shape() == TypeShape::Map && ty.arguments().len() == 2
}

/// Value type of a map type.
pub fn map_value_type(ty: &ResolvedType) -> Option<&ResolvedType> {
    is_map_type(ty).then(|| &ty.arguments()[1])
}

/// Classify `ty` into a [`ModelRef`], naming element and value types in a
/// context derived from `ctx`.
pub fn model_ref(ty: &ResolvedType, ctx: &ModelContext<'_>, names: &dyn TypeNameExtractor) -> ModelRef {
    if let (Some(kind), Some(element)) = (container_kind(ty), container_element_type(ty)) {
        let element_ctx = ctx.from_parent(element);
        return ModelRef::container(kind, names.type_name(&element_ctx));
    }

    if let Some(value) = map_value_type(ty) {
        let value_ctx = ctx.from_parent(value);
        return ModelRef::map(names.type_name(&value_ctx));
    }

    ModelRef::scalar(names.type_name(ctx))
}
