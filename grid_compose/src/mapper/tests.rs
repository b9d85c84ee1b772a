//! Tests for the element-to-value bridge and typed leaf parsing.

use anyhow::{Result, ensure};
use rstest::rstest;
use serde::Deserialize;
use serde_json::{Value, json};

use super::convert::TEXT_KEY;
use super::{element_to_value, from_element, opt_parsed};
use crate::ComposeError;
use crate::tree::{Document, Element};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
struct Limits {
    name: String,
    #[serde(default, deserialize_with = "opt_parsed")]
    max_size: Option<u32>,
    #[serde(default, deserialize_with = "opt_parsed")]
    enabled: Option<bool>,
}

#[rstest]
#[case::text_leaf(Element::new("name").with_text("  dev "), json!("dev"))]
#[case::empty_leaf(Element::new("join"), Value::Null)]
#[case::attributes_only(
    Element::new("map").with_attribute("name", "tasks"),
    json!({"name": "tasks"})
)]
#[case::attribute_and_text(
    Element::new("port").with_attribute("auto-increment", "true").with_text("5701"),
    json!({"auto-increment": "true", TEXT_KEY: "5701"})
)]
fn converts_elements(#[case] element: Element, #[case] expected: Value) {
    assert_eq!(element_to_value(&element), expected);
}

#[rstest]
fn repeated_children_collect_into_arrays() -> Result<()> {
    let document = Document::parse_str(
        r#"<properties>
            <property name="a">1</property>
            <property name="b">2</property>
            <property name="c">3</property>
            <comment-free>x</comment-free>
        </properties>"#,
    )?;
    let value = element_to_value(document.root());
    ensure!(
        value
            == json!({
                "property": [
                    {"name": "a", TEXT_KEY: "1"},
                    {"name": "b", TEXT_KEY: "2"},
                    {"name": "c", TEXT_KEY: "3"}
                ],
                "comment-free": "x"
            }),
        "unexpected conversion {value}"
    );
    Ok(())
}

#[rstest]
fn comments_are_ignored() -> Result<()> {
    let document = Document::parse_str("<name><!-- cluster -->dev</name>")?;
    ensure!(element_to_value(document.root()) == json!("dev"));
    Ok(())
}

#[rstest]
fn from_element_parses_typed_leaves() -> Result<()> {
    let element = Element::new("queue")
        .with_attribute("name", "jobs")
        .with_child(Element::new("max-size").with_text(" 1000 "))
        .with_child(Element::new("enabled").with_text("true"));
    let limits: Limits = from_element(&element)?;
    ensure!(
        limits
            == Limits {
                name: "jobs".to_owned(),
                max_size: Some(1000),
                enabled: Some(true),
            },
        "unexpected limits {limits:?}"
    );
    Ok(())
}

#[rstest]
fn missing_and_empty_leaves_map_to_none() -> Result<()> {
    let element = Element::new("queue")
        .with_attribute("name", "jobs")
        .with_child(Element::new("max-size"));
    let limits: Limits = from_element(&element)?;
    ensure!(limits.max_size.is_none() && limits.enabled.is_none());
    Ok(())
}

#[rstest]
fn unparsable_leaf_reports_the_element() {
    let element = Element::new("queue")
        .with_attribute("name", "jobs")
        .with_child(Element::new("max-size").with_text("lots"));
    let err = from_element::<Limits>(&element).expect_err("mapping should fail");
    match err.as_ref() {
        ComposeError::Mapping { element, source } => {
            assert_eq!(element, "queue");
            assert!(source.to_string().contains("lots"), "{source}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct Credentials {
    name: Option<String>,
    password: Option<String>,
}

#[rstest]
fn empty_element_deserialises_as_defaults() -> Result<()> {
    let credentials: Credentials = from_element(&Element::new("group"))?;
    ensure!(credentials == Credentials::default(), "{credentials:?}");
    ensure!(element_to_value(&Element::new("group")) == Value::Null);
    Ok(())
}
