//! Unit tests for error construction and rendering.

use std::sync::Arc;

use camino::Utf8Path;
use rstest::rstest;

use super::ComposeError;
use crate::tree::XmlError;

#[rstest]
fn fragment_error_names_the_offending_file() {
    let cause = ComposeError::xml("queues.xml", XmlError::MissingRoot);
    let err = ComposeError::fragment(Utf8Path::new("/data/queues.xml"), cause);
    let rendered = err.to_string();
    assert!(
        rendered.contains("/data/queues.xml"),
        "expected fragment path in message, got {rendered}"
    );
    assert_eq!(err.fragment_path(), Some(Utf8Path::new("/data/queues.xml")));
}

#[rstest]
fn fragment_error_exposes_its_cause() {
    let cause = ComposeError::xml("maps.xml", XmlError::MissingRoot);
    let err = ComposeError::fragment(Utf8Path::new("maps.xml"), Arc::clone(&cause));
    let source = std::error::Error::source(err.as_ref()).map(ToString::to_string);
    assert_eq!(source, Some(cause.to_string()));
}

#[rstest]
#[case(ComposeError::precondition("no base"), "precondition failed: no base")]
#[case(
    Arc::new(ComposeError::NotReady),
    "no configuration has been composed yet; call build() or initialise() first"
)]
fn renders_state_and_precondition_errors(#[case] err: Arc<ComposeError>, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
    assert!(err.fragment_path().is_none());
}
