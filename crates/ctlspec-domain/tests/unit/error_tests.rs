//! Error type tests

use ctlspec_domain::Error;
use std::fmt;

#[derive(Debug)]
struct RecordNotFound;

impl fmt::Display for RecordNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("record not found")
    }
}

impl std::error::Error for RecordNotFound {}

#[test]
fn test_error_messages() {
    assert_eq!(Error::unknown_action("publish").to_string(), "Unknown action: publish");
    assert_eq!(
        Error::invalid_model_reference(":gizmo").to_string(),
        "Invalid model reference: :gizmo"
    );
    assert_eq!(Error::NoActionSet.to_string(), "No action set for this example");
}

#[test]
fn test_handler_error_is_transparent_and_downcastable() {
    let err = Error::handler(Box::new(RecordNotFound));
    assert_eq!(err.to_string(), "record not found");
    assert!(err.is_handler_error::<RecordNotFound>());
    assert!(!Error::NoActionSet.is_handler_error::<RecordNotFound>());
}
