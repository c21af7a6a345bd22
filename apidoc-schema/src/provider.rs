//! Field based model property derivation.
//!
//! [`FieldPropertyProvider`] walks the declared fields of a type, keeps the
//! ones its bean metadata source reports for the requested direction and turns
//! each into a [`ModelProperty`]. Unwrapped fields are expanded in place: the
//! properties of the field's type are spliced into the owner's list and the
//! field itself never appears.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, trace, warn};

use crate::collections;
use crate::config::MapperConfig;
use crate::context::ModelContext;
use crate::error::{DeriveError, DeriveResult};
use crate::field::{FieldDescriptor, FieldEnumerator};
use crate::metadata::{BeanMetadataSource, MemberKind};
use crate::naming::{MetadataNamingStrategy, NamingStrategy};
use crate::plugin::{PluginChain, PropertyContext};
use crate::property::{ModelProperty, ModelPropertyBuilder};
use crate::type_name::TypeNameExtractor;
use crate::types::ResolvedType;

/// Source of the documentable properties of a type.
pub trait ModelPropertiesProvider: Send + Sync {
    /// Derive the properties of `ty`, in declaration order.
    fn derive_properties(&self, ty: &ResolvedType, ctx: &ModelContext<'_>) -> DeriveResult<Vec<ModelProperty>>;
}

/// Derives properties from declared fields.
///
/// The provider is configured once with a [`MapperConfig`], either through
/// [`with_config`](Self::with_config) or the
/// [`on_mapper_configured`](Self::on_mapper_configured) event, and can then be
/// shared between threads.
pub struct FieldPropertyProvider {
    fields: Arc<dyn FieldEnumerator>,
    metadata: Arc<dyn BeanMetadataSource>,
    naming: Arc<dyn NamingStrategy>,
    type_names: Arc<dyn TypeNameExtractor>,
    plugins: PluginChain,
    config: OnceLock<Arc<MapperConfig>>,
}

impl FieldPropertyProvider {
    /// Create an unconfigured provider using [`MetadataNamingStrategy`] and no plugins.
    pub fn new(
        fields: Arc<dyn FieldEnumerator>,
        metadata: Arc<dyn BeanMetadataSource>,
        type_names: Arc<dyn TypeNameExtractor>,
    ) -> Self {
        Self {
            fields,
            metadata,
            naming: Arc::new(MetadataNamingStrategy),
            type_names,
            plugins: PluginChain::new(),
            config: OnceLock::new(),
        }
    }

    pub fn with_naming_strategy(mut self, naming: Arc<dyn NamingStrategy>) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_plugins(mut self, plugins: PluginChain) -> Self {
        self.plugins = plugins;
        self
    }

    /// Configure the provider at construction.
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = OnceLock::from(Arc::new(config));
        self
    }

    /// Supply the mapper configuration.
    ///
    /// Only the first call takes effect; later calls return
    /// [`DeriveError::ConfigurationAlreadySet`].
    pub fn on_mapper_configured(&self, config: MapperConfig) -> DeriveResult<()> {
        self.config.set(Arc::new(config)).map_err(|_| {
            warn!("Ignoring mapper configuration: provider is already configured");
            DeriveError::ConfigurationAlreadySet
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.get().is_some()
    }

    /// The mapper configuration, once set.
    pub fn config(&self) -> DeriveResult<&MapperConfig> {
        self.config
            .get()
            .map(Arc::as_ref)
            .ok_or(DeriveError::ConfigurationNotReady)
    }

    /// Every property reachable at this nesting level, unwrapped fields
    /// expanded in place.
    pub fn properties_for(&self, ty: &ResolvedType, ctx: &ModelContext<'_>) -> DeriveResult<Vec<ModelProperty>> {
        let config = self.config()?;
        let mut unwrapping = vec![ty.clone()];
        self.collect_properties(ty, ctx, config, &mut unwrapping)
    }

    fn collect_properties(
        &self,
        ty: &ResolvedType,
        ctx: &ModelContext<'_>,
        config: &MapperConfig,
        unwrapping: &mut Vec<ResolvedType>,
    ) -> DeriveResult<Vec<ModelProperty>> {
        let description = self.metadata.introspect(ty, ctx.direction(), config);
        let index = description.property_index();
        let for_serialization = !config.direction_aware_names || ctx.is_return_type();

        let mut properties = Vec::new();
        for field in self.fields.enumerate_fields(ty) {
            let Some(meta) = index.get(field.name.as_str()) else {
                trace!(field = %field.name, owner = %ty, "Skipping field without metadata");
                continue;
            };

            if !matches!(meta.primary_member, Some(MemberKind::Field)) {
                trace!(
                    field = %field.name,
                    owner = %ty,
                    member = ?meta.primary_member,
                    "Skipping property not backed by a field"
                );
                continue;
            }

            if meta.unwrapped {
                check_unwrap(&field.ty, config, unwrapping)?;
                debug!(field = %field.name, ty = %field.ty, depth = unwrapping.len(), "Expanding unwrapped field");

                unwrapping.push(field.ty.clone());
                let child = ctx.from_parent(&field.ty);
                let nested = self.collect_properties(&field.ty, &child, config, unwrapping);
                unwrapping.pop();

                properties.extend(nested?);
                continue;
            }

            let name = self.naming.name_for(meta, for_serialization);
            properties.push(self.model_property_from(ty, &field, name, ctx)?);
        }

        Ok(properties)
    }

    /// Build the property for one field of `owner` and run it through the
    /// plugin chain.
    pub fn model_property_from(
        &self,
        owner: &ResolvedType,
        field: &FieldDescriptor,
        name: String,
        ctx: &ModelContext<'_>,
    ) -> DeriveResult<ModelProperty> {
        let alternate = ctx.alternate_for(&field.ty);
        let field_ctx = ctx.from_parent(&alternate);
        let model_ref = collections::model_ref(&alternate, &field_ctx, self.type_names.as_ref());
        let annotations = &field.member.annotations;

        let builder = ModelPropertyBuilder::new()
            .with_name(name)
            .with_type(field.ty.clone())
            .with_qualified_type(qualified_type_name(&alternate))
            .with_position(field.position())
            .with_required(annotations.required)
            .with_description(annotations.description.clone())
            .with_allowable_values(annotations.allowable_values.clone())
            .with_example(annotations.example.clone())
            .with_hidden(annotations.hidden)
            .with_model_ref(model_ref);

        let plugin_ctx = PropertyContext {
            owner,
            member: &field.member,
            documentation_type: ctx.documentation_type(),
            direction: ctx.direction(),
        };
        self.plugins.property(builder, &plugin_ctx)
    }
}

impl ModelPropertiesProvider for FieldPropertyProvider {
    #[tracing::instrument(skip(self, ty, ctx), fields(ty = %ty, direction = ?ctx.direction()))]
    fn derive_properties(&self, ty: &ResolvedType, ctx: &ModelContext<'_>) -> DeriveResult<Vec<ModelProperty>> {
        let properties = self.properties_for(ty, ctx)?;

        for name in find_name_collisions(&properties) {
            warn!(property = %name, owner = %ty, "Multiple properties share a name");
        }

        debug!(count = properties.len(), depth = ctx.depth(), "Derived model properties");
        Ok(properties)
    }
}

impl fmt::Debug for FieldPropertyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPropertyProvider")
            .field("plugins", &self.plugins)
            .field("config", &self.config.get())
            .finish_non_exhaustive()
    }
}

fn check_unwrap(ty: &ResolvedType, config: &MapperConfig, unwrapping: &[ResolvedType]) -> DeriveResult<()> {
    let path = || {
        unwrapping
            .iter()
            .chain(std::iter::once(ty))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    };

    if unwrapping.contains(ty) {
        return Err(DeriveError::UnwrapCycle { path: path() });
    }
    if unwrapping.len() > config.max_unwrap_depth {
        return Err(DeriveError::UnwrapDepthExceeded {
            limit: config.max_unwrap_depth,
            path: path(),
        });
    }
    Ok(())
}

/// Fully qualified identity of a documented type.
///
/// Generic types render with their arguments; other types use their erased
/// name.
pub fn qualified_type_name(ty: &ResolvedType) -> String {
    if ty.has_arguments() {
        ty.to_string()
    } else {
        ty.erased_name()
    }
}

/// Names shared by more than one property, in order of first appearance.
pub fn find_name_collisions(properties: &[ModelProperty]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for property in properties {
        *counts.entry(property.name()).or_default() += 1;
    }

    let mut collisions = Vec::new();
    for property in properties {
        if counts.remove(property.name()).is_some_and(|count| count > 1) {
            collisions.push(property.name().to_string());
        }
    }
    collisions
}
