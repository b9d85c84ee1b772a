//! Path selectors identifying the structure kinds a fragment may contribute.
//!
//! A selector is a restricted location path: a sequence of steps, each joined
//! by `/` (child axis) or `//` (descendant axis), testing element names or `*`.
//! Expressions must be absolute. `//hazelcast/map` therefore matches every
//! `map` element whose parent is a `hazelcast` element anywhere in the
//! document, and `/hazelcast/map` only those under the root.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::tree::{Document, Element};
use crate::{ComposeError, ComposeResult};

/// Root element name of grid configuration documents.
pub const GRID_ROOT: &str = "hazelcast";

/// Distributed structure kinds recognised in configuration fragments.
///
/// The declaration order is the order in which fragment contributions are
/// appended to the base document.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StructureKind {
    /// Distributed queues.
    Queue,
    /// Distributed maps.
    Map,
    /// Distributed multimaps.
    MultiMap,
    /// Publish/subscribe topics.
    Topic,
    /// Distributed semaphores.
    Semaphore,
}

impl StructureKind {
    /// Every kind in merge order.
    pub const ALL: [Self; 5] = [
        Self::Queue,
        Self::Map,
        Self::MultiMap,
        Self::Topic,
        Self::Semaphore,
    ];

    /// Element name used for this kind in configuration documents.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Map => "map",
            Self::MultiMap => "multimap",
            Self::Topic => "topic",
            Self::Semaphore => "semaphore",
        }
    }

    /// Kind whose element is called `name`, if any.
    #[must_use]
    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.element_name() == name)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum NameTest {
    Any,
    Named(String),
}

impl NameTest {
    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => element.name() == name,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Step {
    axis: Axis,
    test: NameTest,
}

/// Compiled location path.
///
/// # Examples
///
/// ```
/// use grid_compose::selector::Selector;
/// use grid_compose::tree::Document;
///
/// let document = Document::parse_str(
///     r#"<hazelcast><map name="a"/><queue name="q"/><map name="b"/></hazelcast>"#,
/// )?;
/// let selector: Selector = "//hazelcast/map".parse()?;
/// let names: Vec<_> = selector
///     .select(&document)
///     .into_iter()
///     .filter_map(|element| element.attribute("name"))
///     .collect();
/// assert_eq!(names, ["a", "b"]);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selector {
    expression: String,
    steps: Vec<Step>,
}

impl Selector {
    /// Compile `expression`.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::Selector`] when the expression is empty, is
    /// not absolute, contains an empty step, or uses unsupported syntax.
    pub fn compile(expression: &str) -> ComposeResult<Self> {
        let invalid = |message: &str| {
            Arc::new(ComposeError::Selector {
                expression: expression.to_owned(),
                message: message.to_owned(),
            })
        };
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(invalid("expression is empty"));
        }
        if !trimmed.starts_with('/') {
            return Err(invalid("expression must be absolute"));
        }

        let mut steps = Vec::new();
        let mut rest = trimmed;
        while !rest.is_empty() {
            let (axis, after_axis) = match rest.strip_prefix("//") {
                Some(remainder) => (Axis::Descendant, remainder),
                None => (Axis::Child, rest.strip_prefix('/').unwrap_or(rest)),
            };
            let end = after_axis.find('/').unwrap_or(after_axis.len());
            let (name, remainder) = after_axis.split_at(end);
            steps.push(Step {
                axis,
                test: parse_name_test(name).map_err(invalid)?,
            });
            rest = remainder;
        }
        Ok(Self {
            expression: trimmed.to_owned(),
            steps,
        })
    }

    /// Expression text as compiled.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Every element matching the selector, in document order.
    ///
    /// An empty result is valid and simply means the document contributes
    /// nothing for this selector.
    #[must_use]
    pub fn select<'a>(&self, document: &'a Document) -> Vec<&'a Element> {
        // Matches are tracked as child-index paths from the root so that
        // results can be sorted into document order and deduplicated.
        let mut context: Vec<Vec<usize>> = Vec::new();
        let root = document.root();
        for (position, step) in self.steps.iter().enumerate() {
            let mut next = Vec::new();
            if position == 0 {
                match step.axis {
                    Axis::Child => {
                        if step.test.matches(root) {
                            next.push(Vec::new());
                        }
                    }
                    Axis::Descendant => collect_descendants(root, &[], &step.test, true, &mut next),
                }
            } else {
                for path in &context {
                    let Some(element) = resolve(root, path) else {
                        continue;
                    };
                    match step.axis {
                        Axis::Child => collect_children(element, path, &step.test, &mut next),
                        Axis::Descendant => {
                            collect_descendants(element, path, &step.test, false, &mut next);
                        }
                    }
                }
            }
            next.sort();
            next.dedup();
            context = next;
        }
        context
            .iter()
            .filter_map(|path| resolve(root, path))
            .collect()
    }
}

impl FromStr for Selector {
    type Err = Arc<ComposeError>;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        Self::compile(expression)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

fn parse_name_test(name: &str) -> Result<NameTest, &'static str> {
    if name.is_empty() {
        return Err("expression contains an empty step");
    }
    if name == "*" {
        return Ok(NameTest::Any);
    }
    let is_name_char =
        |ch: char| ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | ':');
    if name.chars().all(is_name_char) {
        Ok(NameTest::Named(name.to_owned()))
    } else {
        Err("only element names and '*' are supported in steps")
    }
}

fn resolve<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    path.iter()
        .try_fold(root, |element, index| element.child_element(*index))
}

fn collect_children(element: &Element, path: &[usize], test: &NameTest, out: &mut Vec<Vec<usize>>) {
    for (index, child) in element.child_elements().enumerate() {
        if test.matches(child) {
            out.push(child_path(path, index));
        }
    }
}

fn collect_descendants(
    element: &Element,
    path: &[usize],
    test: &NameTest,
    include_self: bool,
    out: &mut Vec<Vec<usize>>,
) {
    if include_self && test.matches(element) {
        out.push(path.to_vec());
    }
    for (index, child) in element.child_elements().enumerate() {
        collect_descendants(child, &child_path(path, index), test, true, out);
    }
}

fn child_path(path: &[usize], index: usize) -> Vec<usize> {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(index);
    child
}

/// Ordered, fixed list of selectors applied to every fragment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectorSet {
    selectors: Vec<Selector>,
}

impl SelectorSet {
    /// Selectors for every [`StructureKind`] nested under the grid root,
    /// in merge order.
    #[must_use]
    pub fn grid() -> Self {
        Self::for_root(GRID_ROOT)
    }

    /// Selectors for every [`StructureKind`] nested under elements named
    /// `root`, in merge order.
    #[must_use]
    pub fn for_root(root: &str) -> Self {
        let selectors = StructureKind::ALL
            .into_iter()
            .map(|kind| Selector {
                expression: format!("//{root}/{}", kind.element_name()),
                steps: vec![
                    Step {
                        axis: Axis::Descendant,
                        test: NameTest::Named(root.to_owned()),
                    },
                    Step {
                        axis: Axis::Child,
                        test: NameTest::Named(kind.element_name().to_owned()),
                    },
                ],
            })
            .collect();
        Self { selectors }
    }

    /// Compile a custom set from `expressions`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ComposeError::Selector`] raised while compiling.
    pub fn from_expressions<I, S>(expressions: I) -> ComposeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selectors = expressions
            .into_iter()
            .map(|expression| Selector::compile(expression.as_ref()))
            .collect::<ComposeResult<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// Selectors in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }

    /// Number of selectors in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether the set contains no selectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self::grid()
    }
}

impl<'a> IntoIterator for &'a SelectorSet {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
