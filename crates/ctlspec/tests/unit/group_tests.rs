//! Example group declaration tests

use ctlspec::{Error, ExampleGroup, ExampleRunner, check, params};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn noop() -> impl ctlspec::ActionHandler {
    |_: ctlspec::Verb, _: &ctlspec::Action, _: &ctlspec::Params, _: &mut ctlspec::RequestScope<'_>| -> ctlspec::HandlerResult {
        Ok(())
    }
}

#[test]
fn test_describe_action_names_group_by_verb() {
    let mut group = ExampleGroup::new("WidgetsController");
    for action in ["index", "new", "show", "edit", "create", "update", "destroy"] {
        group.describe_action(action, |_| Ok(())).unwrap();
    }
    let names: Vec<&str> = group.children().iter().map(ExampleGroup::description).collect();
    assert_eq!(
        names,
        ["GET index", "GET new", "GET show", "GET edit", "POST create", "PUT update", "DELETE destroy"]
    );
}

#[test]
fn test_describe_unknown_action_fails_while_building() {
    let mut group = ExampleGroup::new("WidgetsController");
    let err = group.describe_action("publish", |_| Ok(())).err().unwrap();
    assert!(matches!(err, Error::UnknownAction { .. }));
    assert!(group.children().is_empty());
}

#[test]
fn test_nested_build_errors_propagate() {
    let mut group = ExampleGroup::new("WidgetsController");
    let result = group.describe("outer", |outer| {
        outer.describe_action("archive", |_| Ok(()))?;
        Ok(())
    });
    assert!(matches!(result.err(), Some(Error::UnknownAction { .. })));
}

#[test]
fn test_example_count_includes_nested_groups() {
    let mut group = ExampleGroup::new("WidgetsController");
    group.it("one", |_, _| Ok(()));
    group
        .describe("nested", |nested| {
            nested.it("two", |_, _| Ok(())).it("three", |_, _| Ok(()));
            Ok(())
        })
        .unwrap();
    assert_eq!(group.examples().len(), 1);
    assert_eq!(group.example_count(), 3);
}

#[test]
fn test_hooks_run_outermost_first_in_order() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut group = ExampleGroup::new("outer");
    let seen = Rc::clone(&order);
    group.before(move |_| {
        seen.borrow_mut().push("outer-1");
        Ok(())
    });
    let seen = Rc::clone(&order);
    group
        .describe("inner", move |inner| {
            let first = Rc::clone(&seen);
            inner.before(move |_| {
                first.borrow_mut().push("inner-1");
                Ok(())
            });
            inner.it("runs", |_, _| Ok(()));
            Ok(())
        })
        .unwrap();
    let seen = Rc::clone(&order);
    group.before(move |_| {
        seen.borrow_mut().push("outer-2");
        Ok(())
    });

    let report = ExampleRunner::default().run(&group, noop);
    assert!(report.all_passed());
    assert_eq!(*order.borrow(), ["outer-1", "outer-2", "inner-1"]);
}

#[test]
fn test_add_params_merges_before_dispatch() {
    let mut group = ExampleGroup::new("params");
    group.add_params(params! { "page" => 2 });
    group
        .describe("filtered", |filtered| {
            filtered.add_params(params! { "q" => "bolts", "page" => 3 });
            filtered.it("sees merged params", |ctx, _| {
                check(ctx.params().get("page") == Some(&json!(3)), || "page not overridden".into())?;
                check(ctx.params().get("q") == Some(&json!("bolts")), || "q missing".into())
            });
            Ok(())
        })
        .unwrap();
    let report = ExampleRunner::default().run(&group, noop);
    assert!(report.all_passed(), "{:?}", report.failures().collect::<Vec<_>>());
}

#[test]
fn test_params_macro() {
    assert!(params! {}.is_empty());
    let params = params! { "id" => 5, "name" => "sprocket", };
    assert_eq!(params.get("id"), Some(&json!(5)));
    assert_eq!(params.get_text("name").as_deref(), Some("sprocket"));
}

#[test]
fn test_group_macros_prepare_state() {
    let mut group = ExampleGroup::new("WidgetsController");
    group
        .models(&["Widget"])
        .set_action("show")
        .stub_current_user(ctlspec::Attributes::new().with("admin", true))
        .prepare_model("widget");
    group.it("has state", |ctx, _| {
        check(ctx.action().map(ctlspec::Action::name) == Some("show"), || "action".into())?;
        check(ctx.current_actor().is_some(), || "actor".into())?;
        check(ctx.fixture("widget").is_some(), || "widget".into())
    });
    let report = ExampleRunner::default().run(&group, noop);
    assert!(report.all_passed(), "{:?}", report.failures().collect::<Vec<_>>());
}
