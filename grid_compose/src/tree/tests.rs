//! Parsing and serialization tests for the document tree.

use anyhow::{Context, Result, ensure};
use rstest::rstest;

use super::{Document, Element, Node, XmlError};

const GRID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hazelcast xmlns="http://www.hazelcast.com/schema/config">
    <!-- cluster identity -->
    <group>
        <name>dev</name>
        <password>dev-pass</password>
    </group>
    <map name="default">
        <backup-count>1</backup-count>
        <eviction-policy><![CDATA[NONE]]></eviction-policy>
    </map>
    <topic name="news &amp; alerts"/>
</hazelcast>
"#;

#[rstest]
fn parses_elements_attributes_and_text() -> Result<()> {
    let document = Document::parse_str(GRID).context("parse grid document")?;
    let root = document.root();
    ensure!(root.name() == "hazelcast", "unexpected root {}", root.name());
    ensure!(
        root.attribute("xmlns") == Some("http://www.hazelcast.com/schema/config"),
        "namespace declaration should be kept as a plain attribute"
    );
    let names: Vec<&str> = root.child_elements().map(Element::name).collect();
    ensure!(names == ["group", "map", "topic"], "unexpected children {names:?}");

    let group = root.child_element(0).context("group element")?;
    let name = group.child_element(0).context("group name")?;
    ensure!(name.text() == "dev", "unexpected group name {:?}", name.text());

    let topic = root.child_element(2).context("topic element")?;
    ensure!(
        topic.attribute("name") == Some("news & alerts"),
        "attribute values should be unescaped"
    );
    Ok(())
}

#[rstest]
fn keeps_comments_and_cdata_inside_the_root() -> Result<()> {
    let document = Document::parse_str(GRID)?;
    let root = document.root();
    ensure!(
        matches!(root.children().first(), Some(Node::Comment(text)) if text.trim() == "cluster identity"),
        "expected leading comment to survive parsing"
    );
    let eviction = root
        .child_element(1)
        .and_then(|map| map.child_element(1))
        .context("eviction policy element")?;
    ensure!(
        eviction.children() == [Node::CData("NONE".to_owned())],
        "expected CDATA child, got {:?}",
        eviction.children()
    );
    Ok(())
}

#[rstest]
fn serialized_output_parses_back_to_the_same_tree() -> Result<()> {
    let document = Document::parse_str(GRID)?;
    let text = document.to_xml_string()?;
    ensure!(
        text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"),
        "expected XML declaration, got {text}"
    );
    ensure!(
        text.contains("news &amp; alerts"),
        "attribute values should be escaped on output: {text}"
    );
    let reparsed = Document::parse_str(&text)?;
    ensure!(reparsed == document, "round trip changed the tree:\n{text}");
    Ok(())
}

#[rstest]
fn builder_methods_compose_a_tree() -> Result<()> {
    let document = Document::new(
        Element::new("hazelcast").with_child(
            Element::new("queue")
                .with_attribute("name", "jobs")
                .with_child(Element::new("max-size-per-jvm").with_text("10")),
        ),
    );
    let text = document.to_xml_string()?;
    ensure!(
        text.contains(r#"<queue name="jobs">"#),
        "unexpected output {text}"
    );
    ensure!(
        text.contains("<max-size-per-jvm>10</max-size-per-jvm>"),
        "leaf text should stay inline: {text}"
    );
    Ok(())
}

#[rstest]
#[case("", "missing root")]
#[case("this is not xml", "stray text")]
#[case("<a/><b/>", "multiple roots")]
#[case("<a><b></b>", "unclosed")]
#[case("<a></b>", "mismatched end")]
fn rejects_malformed_documents(#[case] input: &str, #[case] label: &str) {
    let result = Document::parse_str(input);
    assert!(result.is_err(), "{label}: expected parse failure");
}

#[rstest]
fn reports_structural_failures_precisely() {
    assert!(matches!(
        Document::parse_str(""),
        Err(XmlError::MissingRoot)
    ));
    assert!(matches!(
        Document::parse_str("<a/><b/>"),
        Err(XmlError::MultipleRoots { first, second }) if first == "a" && second == "b"
    ));
    assert!(matches!(
        Document::parse_str("garbage"),
        Err(XmlError::StrayText)
    ));
}
