//! Display names for documented types.

use serde::{Deserialize, Serialize};

use crate::collections::{container_kind, is_map_type};
use crate::context::ModelContext;
use crate::types::{ResolvedType, TypeShape};

/// Renders the display name of a context's subject type.
pub trait TypeNameExtractor: Send + Sync {
    fn type_name(&self, ctx: &ModelContext<'_>) -> String;
}

/// How generic types are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericNaming {
    /// `Page«Widget»`, `Map«string,Widget»`
    #[default]
    Guillemets,
    /// `PageOfWidget`, `MapOfstringAndWidget`
    Of,
}

impl GenericNaming {
    fn render(&self, base: &str, arguments: &[String]) -> String {
        match self {
            Self::Guillemets => format!("{base}«{}»", arguments.join(",")),
            Self::Of => format!("{base}Of{}", arguments.join("And")),
        }
    }
}

/// Documentation base name for a primitive Rust type, if it has one.
pub fn base_type_name(name: &str) -> Option<&'static str> {
    let base = match name {
        "String" | "str" | "char" => "string",
        "bool" => "boolean",
        "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => "int",
        "i64" | "i128" | "isize" | "u64" | "u128" | "usize" => "long",
        "f32" => "float",
        "f64" => "double",
        "DateTime" | "NaiveDateTime" | "OffsetDateTime" | "PrimitiveDateTime" | "SystemTime" => {
            "date-time"
        }
        "NaiveDate" | "Date" => "date",
        "Uuid" => "uuid",
        "Decimal" | "BigDecimal" => "bigdecimal",
        _ => return None,
    };
    Some(base)
}

/// Names types the way Swagger documentation expects.
///
/// The context's alternate types are applied first. Containers are named by
/// their kind, primitives by their documentation base name and enumerations
/// as `string`. Generic objects and maps render their arguments recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeNameExtractor {
    generic_naming: GenericNaming,
}

impl DefaultTypeNameExtractor {
    pub fn new(generic_naming: GenericNaming) -> Self {
        Self { generic_naming }
    }

    pub fn generic_naming(&self) -> GenericNaming {
        self.generic_naming
    }

    fn name_of(&self, ty: &ResolvedType, ctx: &ModelContext<'_>) -> String {
        if let Some(kind) = container_kind(ty) {
            return kind.as_str().to_string();
        }

        match ty.shape() {
            TypeShape::Primitive => base_type_name(ty.name())
                .map(String::from)
                .unwrap_or_else(|| ty.name().to_string()),
            TypeShape::Enumeration => "string".to_string(),
            TypeShape::Wildcard => "object".to_string(),
            TypeShape::Map if is_map_type(ty) => self.generic_name("Map", ty, ctx),
            _ if ty.has_arguments() => self.generic_name(ty.name(), ty, ctx),
            _ => ty.name().to_string(),
        }
    }

    fn generic_name(&self, base: &str, ty: &ResolvedType, ctx: &ModelContext<'_>) -> String {
        let arguments: Vec<String> = ty
            .arguments()
            .iter()
            .map(|arg| self.type_name(&ctx.from_parent(arg)))
            .collect();
        self.generic_naming.render(base, &arguments)
    }
}

impl TypeNameExtractor for DefaultTypeNameExtractor {
    fn type_name(&self, ctx: &ModelContext<'_>) -> String {
        let ty = ctx.alternate_for(ctx.subject());
        self.name_of(&ty, ctx)
    }
}
