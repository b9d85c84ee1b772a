//! JSON bridge between [`Element`] trees and `serde` types.
//!
//! Conversion rules:
//!
//! - attributes become string members keyed by their qualified name;
//! - child elements become members keyed by element name, and a name that
//!   repeats collects its values into an array in document order;
//! - an element holding only text becomes a string, and an element with
//!   neither attributes, children nor text becomes `null`;
//! - text next to attributes or child elements is kept under [`TEXT_KEY`].
//!
//! Comments are dropped. Leaf values stay strings; use
//! [`super::opt_parsed`] to parse numbers and flags on the typed side.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::tree::Element;
use crate::{ComposeError, ComposeResult};

/// Member holding the text of an element that also has attributes or children.
pub const TEXT_KEY: &str = "$text";

/// Convert `element` into a [`Value`] following the module rules.
///
/// # Examples
///
/// ```
/// use grid_compose::mapper::element_to_value;
/// use grid_compose::tree::Element;
/// use serde_json::json;
///
/// let map = Element::new("map")
///     .with_attribute("name", "tasks")
///     .with_child(Element::new("backup-count").with_text("2"));
/// assert_eq!(
///     element_to_value(&map),
///     json!({"name": "tasks", "backup-count": "2"})
/// );
/// ```
#[must_use]
pub fn element_to_value(element: &Element) -> Value {
    let content = element.text();
    let text = content.trim();
    let has_children = element.child_elements().next().is_some();
    if element.attributes().is_empty() && !has_children {
        return if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_owned())
        };
    }

    let mut members = Map::new();
    for attribute in element.attributes() {
        members.insert(attribute.name.clone(), Value::String(attribute.value.clone()));
    }
    for child in element.child_elements() {
        let value = element_to_value(child);
        match members.entry(child.name()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(values) => values.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }
    if !text.is_empty() {
        members.insert(TEXT_KEY.to_owned(), Value::String(text.to_owned()));
    }
    Value::Object(members)
}

/// Deserialise `element` into `T` through [`element_to_value`].
///
/// An empty element is read as an empty object, so struct targets fall back
/// to their `serde` defaults.
///
/// # Errors
///
/// Returns a [`ComposeError::Mapping`] naming the element when the converted
/// value does not fit `T`.
pub fn from_element<T: DeserializeOwned>(element: &Element) -> ComposeResult<T> {
    let value = match element_to_value(element) {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(value).map_err(|source| {
        Arc::new(ComposeError::Mapping {
            element: element.name().to_owned(),
            source,
        })
    })
}
