//! Double and stub table tests

use ctlspec_domain::doubles::{Stub, StubTarget};
use ctlspec_domain::{
    ArgMatcher, ArgPattern, Attributes, CallArg, ClassDouble, EntityDescriptor, Error, Fixture,
    FixtureId, Reply,
};
use serde_json::json;

fn widget(id: u64) -> Fixture {
    Fixture::new(
        EntityDescriptor::new("Widget"),
        FixtureId::new(id),
        Attributes::new().with("name", "sprocket").with("save", true),
    )
}

#[test]
fn test_attributes_answer_zero_arg_messages() {
    let fixture = widget(7);
    assert_eq!(fixture.call("name", &[]).unwrap(), Reply::Value(json!("sprocket")));
    assert!(fixture.call("save", &[]).unwrap().is_truthy());
    assert_eq!(fixture.call("id", &[]).unwrap(), Reply::Value(json!(7)));
}

#[test]
fn test_unstubbed_message_fails() {
    let fixture = widget(7);
    let err = fixture.call("publish", &[]).unwrap_err();
    assert!(matches!(err, Error::UnstubbedMethod { ref method, .. } if method == "publish"));
}

#[test]
fn test_newest_stub_wins_over_attribute() {
    let fixture = widget(7);
    fixture
        .stub_table()
        .push("save", Stub::new(ArgMatcher::Any, Reply::from(false)));
    assert!(!fixture.call("save", &[]).unwrap().is_truthy());
    fixture
        .stub_table()
        .push("save", Stub::new(ArgMatcher::Any, Reply::from(true)));
    assert!(fixture.call("save", &[]).unwrap().is_truthy());
    assert_eq!(fixture.received_count("save"), 2);
}

#[test]
fn test_exact_matcher_distinguishes_number_and_text() {
    let class = ClassDouble::new(EntityDescriptor::new("Widget"));
    let target = widget(42);
    class.stub_table().push(
        "find",
        Stub::new(
            ArgMatcher::Exactly(vec![ArgPattern::Eq(json!(42))]),
            Reply::from(&target),
        ),
    );
    assert_eq!(class.call("find", &[CallArg::from(42_u64)]).unwrap(), Reply::from(&target));
    let err = class.call("find", &[CallArg::from("42")]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedArguments { .. }));
}

#[test]
fn test_same_pattern_is_identity() {
    let class = ClassDouble::new(EntityDescriptor::new("Widget"));
    let target = widget(42);
    let twin = widget(42);
    class.stub_table().push(
        "find",
        Stub::new(
            ArgMatcher::Exactly(vec![ArgPattern::Same(target.clone())]),
            Reply::from(&target),
        ),
    );
    assert!(class.call("find", &[CallArg::from(&target)]).is_ok());
    assert!(class.call("find", &[CallArg::from(&twin)]).is_err());
}

#[test]
fn test_replace_drops_older_stubs() {
    let class = ClassDouble::new(EntityDescriptor::new("Widget"));
    let first = widget(1);
    let second = widget(2);
    class
        .stub_table()
        .push("find", Stub::new(ArgMatcher::Any, Reply::from(&first)));
    class
        .stub_table()
        .replace("find", vec![Stub::new(ArgMatcher::Any, Reply::from(&second))]);
    assert_eq!(class.stub_table().stubs_for("find").len(), 1);
    assert_eq!(class.call("find", &[]).unwrap(), Reply::from(&second));
}

#[test]
fn test_reset_token_records_and_applies_stub() {
    let fixture = widget(3);
    fixture.reset_token("perishable_token");
    assert_eq!(fixture.received_count("reset_perishable_token"), 1);
    assert!(!fixture.has_attribute("perishable_token"));

    fixture.stub_table().push(
        "reset_persistence_token",
        Stub::new(ArgMatcher::Any, Reply::from(json!("tok-1"))),
    );
    fixture.reset_token("persistence_token");
    assert_eq!(fixture.attribute("persistence_token"), Some(json!("tok-1")));
}

#[test]
fn test_fixture_equality_is_identity() {
    let fixture = widget(5);
    let handle = fixture.clone();
    assert_eq!(fixture, handle);
    assert_ne!(fixture, widget(5));
    assert_eq!(fixture.label(), "#<Widget id: 5>");
}

#[test]
fn test_errors_collection() {
    let fixture = widget(9);
    assert!(!fixture.has_errors());
    fixture.add_error("name", "can't be blank");
    assert_eq!(fixture.errors(), vec![("name".to_string(), "can't be blank".to_string())]);
}
