//! Generated assertion tests

use crate::test_utils::{StaleWidget, WidgetsController};
use ctlspec::{Attributes, Collection, Error, ExampleGroup, ExampleRunner, RunReport, params};

fn widgets() -> ExampleGroup {
    let mut group = ExampleGroup::new("WidgetsController");
    group.models(&["Widget"]);
    group
}

fn run(group: &ExampleGroup) -> RunReport {
    ExampleRunner::default().run(group, WidgetsController::default)
}

fn only_failure(report: &RunReport) -> String {
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1, "{failures:?}");
    failures[0].failure.clone().unwrap_or_default()
}

#[test]
fn test_assert_redirects_to() {
    let mut group = widgets();
    group
        .describe_action("create", |create| {
            create.stubs_for_create("widget", true).assert_redirects_to("/widgets");
            Ok(())
        })
        .unwrap();
    assert!(run(&group).all_passed());

    let mut group = widgets();
    group
        .describe_action("create", |create| {
            create.stubs_for_create("widget", false).assert_redirects_to("/widgets");
            Ok(())
        })
        .unwrap();
    let failure = only_failure(&run(&group));
    assert!(failure.contains("expected redirect to /widgets"), "{failure}");
}

#[test]
fn test_assert_sets_and_not_sets_errors() {
    let mut group = widgets();
    group
        .define_fixture("widget", |ctx| {
            let widget = ctx.stub_model("Widget", Attributes::new())?;
            widget.add_error("name", "can't be blank");
            Ok(widget)
        })
        .describe_action("create", |create| {
            create
                .stubs_for_create("widget", false)
                .assert_sets_errors_on("widget")
                .assert_not_sets_errors_on("widget");
            Ok(())
        })
        .unwrap();
    let report = run(&group);
    assert_eq!(report.passed(), 1);
    let failure = only_failure(&report);
    assert!(failure.contains("expected no errors on @widget"), "{failure}");
}

#[test]
fn test_assert_matches_flash_and_flash_now() {
    let mut group = widgets();
    group
        .describe_action("create", |create| {
            create.describe("when valid", |valid| {
                valid
                    .stubs_for_create("widget", true)
                    .assert_matches(Collection::Flash, "notice", "saved")?;
                Ok(())
            })?;
            create.describe("when invalid", |invalid| {
                invalid
                    .stubs_for_create("widget", false)
                    .assert_matches(Collection::FlashNow, "error", "could not")?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
    let report = run(&group);
    assert!(report.all_passed(), "{:?}", report.failures().collect::<Vec<_>>());
    assert!(
        report
            .outcome("WidgetsController POST create when valid flash[:notice] should match /saved/")
            .is_some()
    );
}

#[test]
fn test_assert_matches_session_and_params() {
    let mut group = widgets();
    group
        .describe_action("show", |show| {
            show.stubs_for_show("widget")
                .assert_matches(Collection::Session, "last_widget", "^1001$")?
                .assert_matches(Collection::Params, "id", "^1001$")?;
            Ok(())
        })
        .unwrap();
    let report = run(&group);
    assert!(report.all_passed(), "{:?}", report.failures().collect::<Vec<_>>());
}

#[test]
fn test_assert_matches_rejects_bad_pattern() {
    let mut group = widgets();
    let err = group
        .assert_matches(Collection::Flash, "notice", "(unclosed")
        .err()
        .unwrap();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(group.example_count(), 0);
}

#[test]
fn test_assert_matches_missing_entry_fails() {
    let mut group = widgets();
    group
        .describe_action("create", |create| {
            create
                .stubs_for_create("widget", false)
                .assert_matches(Collection::Flash, "notice", "saved")?;
            Ok(())
        })
        .unwrap();
    let failure = only_failure(&run(&group));
    assert!(failure.contains("got None"), "{failure}");
}

#[test]
fn test_assert_raises() {
    let mut group = widgets();
    group
        .describe_action("show", |show| {
            show.stubs_for_show("widget");
            show.describe("with a stale widget", |stale| {
                stale.add_params(params! { "stale" => true }).assert_raises::<StaleWidget>();
                Ok(())
            })?;
            show.assert_raises::<StaleWidget>();
            Ok(())
        })
        .unwrap();
    let report = run(&group);
    assert_eq!(report.passed(), 1);
    let failure = only_failure(&report);
    assert!(failure.contains("expected StaleWidget to be raised"), "{failure}");
    assert!(
        report
            .outcome("WidgetsController GET show with a stale widget raises StaleWidget")
            .is_some_and(|outcome| outcome.passed())
    );
}

#[test]
fn test_unexpected_handler_error_fails_the_example() {
    let mut group = widgets();
    group
        .describe_action("show", |show| {
            show.add_params(params! { "stale" => true }).assert_assigns("widget");
            Ok(())
        })
        .unwrap();
    let failure = only_failure(&run(&group));
    assert_eq!(failure, "widget is stale");
}

#[test]
fn test_assert_assigns_and_paginates() {
    let mut group = widgets();
    group
        .describe_action("index", |index| {
            index
                .stubs_for_index("widget")
                .assert_paginates_and_assigns("Widget", "widgets")
                .assert_assigns("widgets")
                .assert_assigns("widget");
            Ok(())
        })
        .unwrap();
    let report = run(&group);
    assert_eq!(report.passed(), 2);
    let failure = only_failure(&report);
    assert!(failure.contains("expected @widget to be assigned"), "{failure}");
}

#[test]
fn test_assert_redirects_action_to() {
    let mut group = widgets();
    group
        .stub_current_user(Attributes::new())
        .stubs_for_destroy("widget", true)
        .assert_redirects_action_to("destroy", "/")
        .unwrap();
    let report = run(&group);
    assert!(report.all_passed(), "{:?}", report.failures().collect::<Vec<_>>());
    assert!(report.outcome("WidgetsController DELETE destroy redirects to /").is_some());
}
