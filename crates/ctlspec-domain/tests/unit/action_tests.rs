//! Action and verb table tests

use ctlspec_domain::{Action, Error, Verb, resolve_verb};

#[test]
fn test_resolve_verb_table() {
    let table = [
        ("index", Verb::Get),
        ("new", Verb::Get),
        ("show", Verb::Get),
        ("edit", Verb::Get),
        ("create", Verb::Post),
        ("update", Verb::Put),
        ("destroy", Verb::Delete),
    ];
    for (name, verb) in table {
        assert_eq!(resolve_verb(&Action::from(name)).unwrap(), verb, "{name}");
    }
}

#[test]
fn test_resolve_verb_is_repeatable() {
    let action = Action::from("update");
    assert_eq!(action.verb().unwrap(), Verb::Put);
    assert_eq!(action.verb().unwrap(), Verb::Put);
}

#[test]
fn test_unknown_action_carries_name() {
    let err = resolve_verb(&Action::from("publish")).unwrap_err();
    match err {
        Error::UnknownAction { action } => assert_eq!(action, "publish"),
        other => panic!("expected UnknownAction, got {other:?}"),
    }
}

#[test]
fn test_member_actions() {
    for name in ["show", "edit", "update", "destroy"] {
        assert!(Action::from(name).is_member(), "{name}");
    }
    for name in ["index", "new", "create"] {
        assert!(!Action::from(name).is_member(), "{name}");
    }
}

#[test]
fn test_verb_display() {
    assert_eq!(Verb::Get.to_string(), "GET");
    assert_eq!(Verb::Delete.to_string(), "DELETE");
}
