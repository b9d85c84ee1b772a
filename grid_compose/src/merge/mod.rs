//! Import of selected fragment subtrees into a base document.
//!
//! Composition is purely additive: every element matched by a selector is
//! deep-copied and appended as the last child of the anchor, with no
//! deduplication against what the anchor already holds.

use camino::Utf8Path;
use tracing::debug;

use crate::ComposeResult;
use crate::selector::SelectorSet;
use crate::tree::{Document, Element};

/// Append every node `selectors` match in `fragment` to `anchor`.
///
/// Selectors are evaluated in set order; matches of one selector keep their
/// document order. Returns the number of appended elements.
pub fn merge_document_into(
    anchor: &mut Element,
    fragment: &Document,
    selectors: &SelectorSet,
) -> usize {
    let mut appended = 0;
    for selector in selectors {
        let matches = selector.select(fragment);
        debug!(
            selector = selector.expression(),
            matches = matches.len(),
            "evaluated fragment selector"
        );
        for element in matches {
            anchor.append_element(element.clone());
            appended += 1;
        }
    }
    appended
}

/// Parse the fragment at `fragment_path` and merge it into `anchor`.
///
/// The fragment is parsed once regardless of how many selectors apply.
///
/// # Errors
///
/// Returns a [`crate::ComposeError::File`] when the fragment cannot be read
/// and a [`crate::ComposeError::Xml`] when it is not well-formed. Failures are
/// not isolated here; the caller decides whether to abort.
pub fn merge_fragment_into(
    anchor: &mut Element,
    fragment_path: &Utf8Path,
    selectors: &SelectorSet,
) -> ComposeResult<usize> {
    let fragment = Document::read_file(fragment_path)?;
    let appended = merge_document_into(anchor, &fragment, selectors);
    debug!(fragment = %fragment_path, appended, "merged configuration fragment");
    Ok(appended)
}
