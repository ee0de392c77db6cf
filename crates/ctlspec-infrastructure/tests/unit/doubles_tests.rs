//! In-memory double factory tests

use ctlspec_domain::ports::DoubleFactory;
use ctlspec_domain::{ArgMatcher, Attributes, EntityDescriptor, Error, HarnessSettings, Reply};
use ctlspec_infrastructure::InMemoryDoubleFactory;

#[test]
fn test_ids_are_sequential_per_factory() {
    let factory = InMemoryDoubleFactory::new(1001);
    let widget = EntityDescriptor::new("Widget");
    let first = factory.create_double(&widget, Attributes::new()).unwrap();
    let second = factory.create_double(&widget, Attributes::new()).unwrap();
    assert_eq!(first.id().value(), 1001);
    assert_eq!(second.id().value(), 1002);

    let fresh = InMemoryDoubleFactory::new(1001);
    assert_eq!(fresh.create_double(&widget, Attributes::new()).unwrap().id().value(), 1001);
}

#[test]
fn test_default_factory_follows_settings() {
    let factory = InMemoryDoubleFactory::default();
    let first = factory
        .create_double(&EntityDescriptor::new("User"), Attributes::new())
        .unwrap();
    assert_eq!(first.id().value(), HarnessSettings::default().first_fixture_id);
    assert_eq!(factory.factory_name(), "in-memory");
}

#[test]
fn test_non_numeric_id_is_rejected() {
    let factory = InMemoryDoubleFactory::new(1);
    let err = factory
        .create_double(
            &EntityDescriptor::new("Widget"),
            Attributes::new().with("id", "abc"),
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_class_double_is_shared() {
    let factory = InMemoryDoubleFactory::new(1);
    let widget = EntityDescriptor::new("Widget");
    let class = factory.class_double(&widget);
    factory.stub_method(&class, "count", ArgMatcher::Any, Reply::from(serde_json::json!(3)));
    let again = factory.class_double(&widget);
    assert!(class.ptr_eq(&again));
    assert_eq!(again.call("count", &[]).unwrap(), Reply::from(serde_json::json!(3)));
}

#[test]
fn test_explicit_id_cannot_be_reused() {
    let factory = InMemoryDoubleFactory::new(1);
    let widget = EntityDescriptor::new("Widget");
    factory
        .create_double(&widget, Attributes::new().with("id", 42))
        .unwrap();
    let err = factory
        .create_double(&EntityDescriptor::new("Comment"), Attributes::new().with("id", 42))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_generated_id_cannot_be_claimed_explicitly() {
    let factory = InMemoryDoubleFactory::new(7);
    let widget = EntityDescriptor::new("Widget");
    let generated = factory.create_double(&widget, Attributes::new()).unwrap();
    let err = factory
        .create_double(&widget, Attributes::new().with("id", generated.id().value()))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_exhausted_sequence_fails_cleanly() {
    let factory = InMemoryDoubleFactory::new(u64::MAX);
    let widget = EntityDescriptor::new("Widget");
    let last = factory.create_double(&widget, Attributes::new()).unwrap();
    assert_eq!(last.id().value(), u64::MAX);
    let err = factory.create_double(&widget, Attributes::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}
