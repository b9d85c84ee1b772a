//! Owned XML document tree used as the composition medium.
//!
//! Documents are parsed eagerly into [`Element`] values so the builder can
//! own the base tree outright and append deep copies of fragment nodes to it.
//! Element and attribute names are kept exactly as written: qualified names
//! such as `hz:map` are matched literally and no namespace resolution takes
//! place. Whitespace-only text is discarded on read and the serializer
//! re-indents the output.

mod parse;
mod write;

use std::io::Read;

use camino::Utf8Path;
use thiserror::Error;

use crate::{ComposeError, ComposeResult, ComposeResultExt};

/// Failures raised while reading or writing XML text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlError {
    /// The underlying reader or writer rejected the input.
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// The document contains no element at all.
    #[error("document has no root element")]
    MissingRoot,

    /// A second top-level element follows the root.
    #[error("document has more than one root element: <{first}> and <{second}>")]
    MultipleRoots {
        /// Name of the first root element.
        first: String,
        /// Name of the element found after it.
        second: String,
    },

    /// The input ended while an element was still open.
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    /// Character data appears outside the root element.
    #[error("character data outside the root element")]
    StrayText,

    /// The bytes are not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),
}

/// Name/value pair attached to an [`Element`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    /// Qualified attribute name.
    pub name: String,
    /// Unescaped attribute value.
    pub value: String,
}

/// Child of an [`Element`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Unescaped character data.
    Text(String),
    /// CDATA section content.
    CData(String),
    /// Comment content.
    Comment(String),
}

/// Labelled tree node with ordered attributes and children.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute, returning the element for chaining.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a text child, returning the element for chaining.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a child element, returning the element for chaining.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Qualified element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the attribute called `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// All children in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) | Node::CData(_) | Node::Comment(_) => None,
        })
    }

    /// Child element at `index` among [`Self::child_elements`].
    #[must_use]
    pub fn child_element(&self, index: usize) -> Option<&Self> {
        self.child_elements().nth(index)
    }

    /// Concatenated text and CDATA content of the direct children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                Node::Element(_) | Node::Comment(_) => None,
            })
            .collect()
    }

    /// Append `node` as the last child.
    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Append `element` as the last child.
    pub fn append_element(&mut self, element: Self) {
        self.append(Node::Element(element));
    }
}

/// Parsed XML document with a single root element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wrap `root` as a document.
    #[must_use]
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse a document from `text`.
    ///
    /// # Errors
    ///
    /// Returns an [`XmlError`] when `text` is not a well-formed document with
    /// exactly one root element.
    pub fn parse_str(text: &str) -> Result<Self, XmlError> {
        parse::parse_document(text)
    }

    /// Read a whole document from `reader`.
    ///
    /// `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::File`] when reading fails and a
    /// [`ComposeError::Xml`] when the content is not well-formed.
    pub fn from_reader<R: Read>(mut reader: R, origin: &str) -> ComposeResult<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .for_file(Utf8Path::new(origin))?;
        let text = String::from_utf8(bytes)
            .map_err(|err| ComposeError::xml(origin, XmlError::Encoding(err.to_string())))?;
        Self::parse_str(&text).map_err(|err| ComposeError::xml(origin, err))
    }

    /// Read and parse the document stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::File`] when the file cannot be read and a
    /// [`ComposeError::Xml`] when its content is not well-formed.
    pub fn read_file(path: &Utf8Path) -> ComposeResult<Self> {
        let text = std::fs::read_to_string(path).for_file(path)?;
        Self::parse_str(&text).map_err(|err| ComposeError::xml(path.as_str(), err))
    }

    /// Root element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable root element; the root itself can never be replaced.
    pub const fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serialize the document with an XML declaration and indentation.
    ///
    /// # Errors
    ///
    /// Returns an [`XmlError`] if the writer rejects the tree.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        write::write_document(self)
    }
}

#[cfg(test)]
mod tests;
