//! Per-action stub bundle tests

use crate::test_utils::{context, expect_fixture};
use ctlspec_domain::{CallArg, Reply};
use serde_json::json;

#[test]
fn test_stubs_for_new_answers_fixture() {
    let mut ctx = context();
    let widget = ctx.stubs_for_new("widget").unwrap();
    let class = ctx.model_class("Widget").unwrap();
    let reply = class.call("new", &[CallArg::from(json!({"name": "x"}))]).unwrap();
    assert!(expect_fixture(reply).ptr_eq(&widget));
}

#[test]
fn test_stubs_for_create_controls_save() {
    let mut ctx = context();
    let widget = ctx.stubs_for_create("widget", false).unwrap();
    assert!(!widget.call("save", &[]).unwrap().is_truthy());

    let mut ctx = context();
    let widget = ctx.stubs_for_create("widget", true).unwrap();
    assert!(widget.call("save", &[]).unwrap().is_truthy());
}

#[test]
fn test_stubs_for_show_sets_id_param() {
    let mut ctx = context();
    let widget = ctx.stubs_for_show("widget").unwrap();
    assert_eq!(ctx.params().get("id"), Some(&widget.id().to_value()));
    let class = ctx.model_class("Widget").unwrap();
    let reply = class
        .call("find", &[CallArg::from(widget.id().to_param())])
        .unwrap();
    assert!(expect_fixture(reply).ptr_eq(&widget));
}

#[test]
fn test_stubs_for_show_keeps_explicit_id() {
    let mut ctx = context();
    ctx.set_param("id", "slug");
    ctx.stubs_for_edit("widget").unwrap();
    assert_eq!(ctx.params().get("id"), Some(&json!("slug")));
}

#[test]
fn test_stubs_for_update_and_destroy() {
    let mut ctx = context();
    let widget = ctx.stubs_for_update("widget", true).unwrap();
    assert!(widget.call("update_attributes", &[CallArg::from(json!({}))]).unwrap().is_truthy());

    let mut ctx = context();
    let widget = ctx.stubs_for_destroy("widget", false).unwrap();
    assert_eq!(widget.call("destroy", &[]).unwrap(), Reply::from(false));
}

#[test]
fn test_stubs_for_index_answers_page() {
    let mut ctx = context();
    let widget = ctx.stubs_for_index("widget").unwrap();
    let class = ctx.model_class("Widget").unwrap();
    for message in ["paginate", "all"] {
        let reply = class.call(message, &[]).unwrap();
        let page = reply.as_collection().unwrap();
        assert_eq!(page.len(), 1);
        assert!(page[0].ptr_eq(&widget));
    }
}
