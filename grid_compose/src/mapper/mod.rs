//! Mapping of composed documents onto typed configuration objects.
//!
//! The builder hands the root of the composite document to a [`ConfigMapper`]
//! and stores the serialized composite on the result through
//! [`XmlSourced`]. Mappers are free to walk the tree directly or to go
//! through the JSON bridge in [`convert`], which turns an element into a
//! [`serde_json::Value`] that `serde` can deserialise into plain structs.

pub mod convert;
mod text;

pub use convert::{element_to_value, from_element};
pub use text::opt_parsed;

use crate::ComposeResult;
use crate::tree::Element;

/// Typed configuration that remembers the document it was mapped from.
pub trait XmlSourced {
    /// Store the serialized composite document.
    fn set_xml_config(&mut self, xml: String);

    /// Serialized composite document, once it has been stored.
    fn xml_config(&self) -> Option<&str>;
}

/// Converts the root element of a composite document into a typed object.
pub trait ConfigMapper {
    /// Configuration type produced by this mapper.
    type Output: XmlSourced;

    /// Map `root` onto [`Self::Output`].
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ComposeError::Mapping`] when the tree does not fit
    /// the output type.
    fn map(&self, root: &Element) -> ComposeResult<Self::Output>;
}

#[cfg(test)]
mod tests;
