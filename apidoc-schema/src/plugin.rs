//! Property post-processing plugins.
//!
//! Plugins are the extension point for derived properties. Every property is
//! passed through the [`PluginChain`] as a [`ModelPropertyBuilder`] before it
//! is built, so a plugin may rewrite any attribute.
//!
//! # Example
//! ```rust,ignore
//! use apidoc_schema::plugin::{self, PluginChain};
//!
//! let plugins = PluginChain::new()
//!     .register("deprecated-notes", plugin::from_fn(|builder, ctx| {
//!         let note = format!("Declared on {}", ctx.owner.name());
//!         Ok(builder.with_description(Some(note)))
//!     }));
//! ```

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::context::{Direction, DocumentationType};
use crate::error::DeriveResult;
use crate::field::RawMember;
use crate::property::{ModelProperty, ModelPropertyBuilder};
use crate::types::ResolvedType;

/// What a plugin knows about the property being built.
#[derive(Debug, Clone, Copy)]
pub struct PropertyContext<'a> {
    /// Type whose properties are being derived
    pub owner: &'a ResolvedType,
    /// Member backing the property
    pub member: &'a RawMember,
    /// Documentation format being generated
    pub documentation_type: DocumentationType,
    /// Direction the owner is documented in
    pub direction: Direction,
}

/// Error raised by a plugin.
#[derive(Debug, Error)]
#[error("plugin '{plugin}' failed: {message}")]
pub struct PluginError {
    /// Name the failing plugin was registered under
    pub plugin: String,
    /// Human readable message
    pub message: String,
    /// Underlying cause, if any
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            plugin: String::new(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = plugin.into();
        self
    }
}

/// Plugin function type
pub type PropertyPluginFn = Arc<
    dyn Fn(ModelPropertyBuilder, &PropertyContext<'_>) -> Result<ModelPropertyBuilder, PluginError>
        + Send
        + Sync,
>;

/// Create a plugin from a closure.
pub fn from_fn<F>(f: F) -> PropertyPluginFn
where
    F: Fn(ModelPropertyBuilder, &PropertyContext<'_>) -> Result<ModelPropertyBuilder, PluginError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Plugin marking every property backed by a non-optional field as required.
pub fn require_non_nullable() -> PropertyPluginFn {
    from_fn(|builder, ctx| {
        let required = builder.is_required() || !ctx.member.nullable;
        Ok(builder.with_required(required))
    })
}

#[derive(Clone)]
struct RegisteredPlugin {
    name: String,
    documentation_type: Option<DocumentationType>,
    apply: PropertyPluginFn,
}

impl RegisteredPlugin {
    fn supports(&self, documentation_type: DocumentationType) -> bool {
        self.documentation_type
            .map_or(true, |supported| supported == documentation_type)
    }
}

/// Ordered list of property plugins.
#[derive(Clone, Default)]
pub struct PluginChain {
    plugins: Vec<RegisteredPlugin>,
}

impl PluginChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin for every documentation type.
    pub fn register(mut self, name: impl Into<String>, plugin: PropertyPluginFn) -> Self {
        self.plugins.push(RegisteredPlugin {
            name: name.into(),
            documentation_type: None,
            apply: plugin,
        });
        self
    }

    /// Register a plugin that only runs for one documentation type.
    pub fn register_for(
        mut self,
        name: impl Into<String>,
        documentation_type: DocumentationType,
        plugin: PropertyPluginFn,
    ) -> Self {
        self.plugins.push(RegisteredPlugin {
            name: name.into(),
            documentation_type: Some(documentation_type),
            apply: plugin,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Names of the registered plugins, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name.as_str())
    }

    /// Run the applicable plugins in registration order and build the result.
    pub fn property(
        &self,
        builder: ModelPropertyBuilder,
        ctx: &PropertyContext<'_>,
    ) -> DeriveResult<ModelProperty> {
        let builder = self
            .plugins
            .iter()
            .filter(|plugin| plugin.supports(ctx.documentation_type))
            .try_fold(builder, |builder, plugin| {
                debug!(plugin = %plugin.name, member = %ctx.member.name, "Applying property plugin");
                (plugin.apply)(builder, ctx).map_err(|e| e.with_plugin(plugin.name.as_str()))
            })?;

        builder.build()
    }
}

impl fmt::Debug for PluginChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
