//! Fixture registry tests

use crate::test_utils::context;
use ctlspec_application::ExampleContext;
use ctlspec_domain::{Attributes, EntityDescriptor, EntityRef, Error};

#[test]
fn test_prepare_is_memoized() {
    let mut ctx = context();
    let first = ctx.prepare_model("widget").unwrap();
    let second = ctx.prepare_model("Widget").unwrap();
    let third = ctx
        .prepare_model(EntityRef::Class(EntityDescriptor::new("Widget")))
        .unwrap();
    assert!(first.ptr_eq(&second));
    assert!(first.ptr_eq(&third));
    assert_eq!(ctx.registry().len(), 1);
}

#[test]
fn test_fixtures_differ_across_examples() {
    let mut one = context();
    let mut two = context();
    let a = one.prepare_model("widget").unwrap();
    let b = two.prepare_model("widget").unwrap();
    assert!(!a.ptr_eq(&b));
}

#[test]
fn test_custom_constructor_runs_once() {
    let mut ctx = context();
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let seen = calls.clone();
    ctx.define_fixture(
        "widget",
        ExampleContext::constructor(move |ctx| {
            seen.set(seen.get() + 1);
            ctx.stub_model("Widget", Attributes::new().with("id", 42).with("name", "sprocket"))
        }),
    );

    let widget = ctx.prepare_model("widget").unwrap();
    ctx.prepare_model("widget").unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(widget.id().value(), 42);
    assert_eq!(widget.attribute("name"), Some(serde_json::json!("sprocket")));
}

#[test]
fn test_generic_fixture_without_constructor() {
    let mut ctx = context();
    let widget = ctx.prepare_model("widget").unwrap();
    assert_eq!(widget.descriptor().class_name(), "Widget");
    assert_eq!(widget.id().value(), 1001);
    assert!(ctx.registry().last_prepared().unwrap().ptr_eq(&widget));
    assert!(ctx.fixture("widget").unwrap().ptr_eq(&widget));
}

#[test]
fn test_unresolvable_model_is_invalid_reference() {
    let mut ctx = context();
    let err = ctx.prepare_model("gizmo").unwrap_err();
    assert!(matches!(err, Error::InvalidModelReference { .. }));
    assert!(ctx.registry().is_empty());
}

#[test]
fn test_generic_fixture_avoids_explicit_id() {
    let mut ctx = context();
    let first_id = ctx.settings().first_fixture_id;
    let numbered = ctx
        .stub_model("Widget", Attributes::new().with("id", first_id))
        .unwrap();
    let generic = ctx.prepare_model("widget").unwrap();
    assert_ne!(numbered.id(), generic.id());
}
