//! Plugin tests - post-processing order, scoping and error propagation

use std::sync::{Arc, Mutex};

use super::support::{derive, names, provider, FieldSpec, StaticModel, TypeSpec};
use crate::plugin::{self, PluginChain, PluginError, PropertyContext};
use crate::{
    AlternateTypeProvider, DeriveError, Direction, DocumentationType, ModelContext,
    ModelPropertiesProvider, ModelProperty, ModelRef, RawMember, ResolvedType,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn model() -> StaticModel {
    StaticModel::new().with_type(
        "Ticket",
        TypeSpec::new()
            .field(FieldSpec::new("id", ResolvedType::primitive("u64")))
            .field(FieldSpec::new("title", ResolvedType::primitive("String")).nullable()),
    )
}

/// A plugin that appends its name to the description.
fn tagging(tag: &'static str) -> plugin::PropertyPluginFn {
    plugin::from_fn(move |builder, _ctx| {
        let description = match builder.description() {
            Some(existing) => format!("{existing},{tag}"),
            None => tag.to_string(),
        };
        Ok(builder.with_description(Some(description)))
    })
}

fn derive_for(
    provider: &crate::FieldPropertyProvider,
    documentation_type: DocumentationType,
) -> Result<Vec<ModelProperty>, DeriveError> {
    let ticket = ResolvedType::object("Ticket");
    let alternates = AlternateTypeProvider::new();
    let ctx = ModelContext::return_value(&ticket, documentation_type, &alternates);
    provider.derive_properties(&ticket, &ctx)
}

// =============================================================================
// Chain Behavior
// =============================================================================

#[test]
fn test_empty_chain_builds_unchanged() {
    let member = RawMember::new(ResolvedType::object("Ticket"), "id", 0);
    let owner = ResolvedType::object("Ticket");
    let ctx = PropertyContext {
        owner: &owner,
        member: &member,
        documentation_type: DocumentationType::Swagger2,
        direction: Direction::Serialization,
    };
    let builder = ModelProperty::builder()
        .with_name("id")
        .with_type(ResolvedType::primitive("u64"))
        .with_model_ref(ModelRef::scalar("long"));

    let property = PluginChain::new().property(builder.clone(), &ctx).unwrap();
    assert_eq!(property, builder.build().unwrap());
}

#[test]
fn test_plugins_run_in_registration_order() {
    let plugins = PluginChain::new()
        .register("first", tagging("a"))
        .register("second", tagging("b"))
        .register("third", tagging("c"));
    let provider = provider(model()).with_plugins(plugins);

    let props = derive_for(&provider, DocumentationType::Swagger2).unwrap();
    assert!(props.iter().all(|p| p.description() == "a,b,c"));
}

#[test]
fn test_plugin_runs_for_every_property() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = {
        let seen = Arc::clone(&seen);
        plugin::from_fn(move |builder, ctx| {
            seen.lock().unwrap().push((ctx.member.name.clone(), ctx.member.index));
            Ok(builder)
        })
    };
    let provider = provider(model()).with_plugins(PluginChain::new().register("recorder", recorder));

    let props = derive(&provider, &ResolvedType::object("Ticket"), Direction::Serialization);

    assert_eq!(names(&props), vec!["id", "title"]);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("id".to_string(), 0), ("title".to_string(), 1)]
    );
}

#[test]
fn test_plugin_can_override_any_attribute() {
    let rewrite = plugin::from_fn(|builder, ctx| {
        if ctx.member.name == "title" {
            Ok(builder
                .with_name("headline")
                .with_model_ref(ModelRef::scalar("text"))
                .with_hidden(true))
        } else {
            Ok(builder)
        }
    });
    let provider = provider(model()).with_plugins(PluginChain::new().register("rewrite", rewrite));

    let props = derive_for(&provider, DocumentationType::OpenApi3).unwrap();
    assert_eq!(props[1].name(), "headline");
    assert_eq!(props[1].model_ref(), &ModelRef::scalar("text"));
    assert!(props[1].is_hidden());
    assert_eq!(props[0].name(), "id");
}

#[test]
fn test_plugins_scoped_to_documentation_type() {
    let plugins = PluginChain::new()
        .register("always", tagging("all"))
        .register_for("oas3-only", DocumentationType::OpenApi3, tagging("oas3"));
    let provider = provider(model()).with_plugins(plugins);

    let swagger = derive_for(&provider, DocumentationType::Swagger2).unwrap();
    assert_eq!(swagger[0].description(), "all");

    let openapi = derive_for(&provider, DocumentationType::OpenApi3).unwrap();
    assert_eq!(openapi[0].description(), "all,oas3");
}

#[test]
fn test_require_non_nullable() {
    let provider = provider(model())
        .with_plugins(PluginChain::new().register("required", plugin::require_non_nullable()));

    let props = derive_for(&provider, DocumentationType::Swagger2).unwrap();
    assert!(props[0].is_required());
    assert!(!props[1].is_required());
}

// =============================================================================
// Error Propagation
// =============================================================================

#[test]
fn test_plugin_error_aborts_derivation() {
    let reject = plugin::from_fn(|builder, ctx| {
        if ctx.member.name == "title" {
            Err(PluginError::new("titles are not allowed"))
        } else {
            Ok(builder)
        }
    });
    let provider = provider(model()).with_plugins(PluginChain::new().register("gatekeeper", reject));

    let err = derive_for(&provider, DocumentationType::Swagger2).unwrap_err();
    match err {
        DeriveError::PostProcessing(e) => {
            assert_eq!(e.plugin, "gatekeeper");
            assert_eq!(e.message, "titles are not allowed");
        }
        other => panic!("expected a plugin error, got {other:?}"),
    }
}

#[test]
fn test_plugin_error_keeps_cause() {
    let failing = plugin::from_fn(|_builder, _ctx| {
        let cause = "x".parse::<u32>().unwrap_err();
        Err(PluginError::new("bad example value").with_cause(cause))
    });
    let provider = provider(model()).with_plugins(PluginChain::new().register("examples", failing));

    let err = derive_for(&provider, DocumentationType::Swagger2).unwrap_err();
    assert_eq!(err.to_string(), "plugin 'examples' failed: bad example value");
    match err {
        DeriveError::PostProcessing(e) => {
            let cause = e.cause.expect("cause is kept");
            assert_eq!(cause.to_string(), "invalid digit found in string");
        }
        other => panic!("expected a plugin error, got {other:?}"),
    }
}

#[test]
fn test_plugin_clearing_name_fails_build() {
    let strip = plugin::from_fn(|_builder, _ctx| Ok(crate::ModelPropertyBuilder::new()));
    let provider = provider(model()).with_plugins(PluginChain::new().register("strip", strip));

    let err = derive_for(&provider, DocumentationType::Swagger2).unwrap_err();
    assert!(matches!(err, DeriveError::IncompleteProperty { missing: "name" }));
}

#[test]
fn test_chain_debug_lists_names() {
    let chain = PluginChain::new()
        .register("one", tagging("1"))
        .register("two", tagging("2"));
    assert_eq!(format!("{chain:?}"), r#"["one", "two"]"#);
    assert_eq!(chain.len(), 2);
}
