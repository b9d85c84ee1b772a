//! Event-driven construction of [`Document`] trees from XML text.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Attribute, Document, Element, Node, XmlError};

/// Parse `text` into a document, rejecting anything but a single root.
pub(super) fn parse_document(text: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);
    reader.check_end_names(true);

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    loop {
        match reader.read_event()? {
            Event::Start(start) => open.push(element_from_start(&reader, &start)?),
            Event::Empty(start) => {
                let element = element_from_start(&reader, &start)?;
                close_element(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                // `check_end_names` rejects unmatched end tags before we get here.
                if let Some(element) = open.pop() {
                    close_element(&mut open, &mut root, element)?;
                }
            }
            Event::Text(chars) => {
                let content = chars.unescape()?.into_owned();
                push_character_data(&mut open, Node::Text(content))?;
            }
            Event::CData(cdata) => {
                let content = reader.decoder().decode(&cdata)?.into_owned();
                push_character_data(&mut open, Node::CData(content))?;
            }
            Event::Comment(comment) => {
                // Comments in the prolog and epilog are dropped.
                if let Some(parent) = open.last_mut() {
                    let content = reader.decoder().decode(&comment)?.into_owned();
                    parent.append(Node::Comment(content));
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(XmlError::UnclosedElement(unclosed.name));
    }
    root.map(Document::new).ok_or(XmlError::MissingRoot)
}

fn element_from_start(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let decoder = reader.decoder();
    let name = decoder.decode(start.name().as_ref())?.into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        attributes.push(Attribute {
            name: decoder.decode(attr.key.as_ref())?.into_owned(),
            value: attr.decode_and_unescape_value(reader)?.into_owned(),
        });
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Attach a completed element to its parent, or install it as the root.
fn close_element(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = open.last_mut() {
        parent.append_element(element);
        return Ok(());
    }
    if let Some(first) = root.as_ref() {
        return Err(XmlError::MultipleRoots {
            first: first.name.clone(),
            second: element.name,
        });
    }
    *root = Some(element);
    Ok(())
}

fn push_character_data(open: &mut [Element], node: Node) -> Result<(), XmlError> {
    let parent = open.last_mut().ok_or(XmlError::StrayText)?;
    parent.append(node);
    Ok(())
}
