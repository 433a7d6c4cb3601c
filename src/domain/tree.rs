//! Parameter tree: the in-memory model of a prm document.

use std::fmt;

use indexmap::map::{Entry, Iter, Keys};
use indexmap::IndexMap;

/// Reserved top-level section holding `set` lines declared outside any `subsection`.
pub const GLOBAL_SECTION: &str = "Global parameters";

/// Terminal parameter holding a single string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub value: String,
}

impl Leaf {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A node is either a nested section or a leaf; never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Section(ParameterTree),
    Leaf(Leaf),
}

impl Node {
    pub fn as_section(&self) -> Option<&ParameterTree> {
        match self {
            Node::Section(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Section(_) => None,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Node::Section(_))
    }

    /// Human-readable kind, used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Section(_) => "section",
            Node::Leaf(_) => "parameter",
        }
    }
}

/// Ordered mapping from key to [`Node`].
///
/// Equality is structural and ignores insertion order, like a dictionary
/// comparison. Order only matters when rendering back to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterTree {
    entries: IndexMap<String, Node>,
}

impl ParameterTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    pub fn entry(&mut self, key: String) -> Entry<'_, String, Node> {
        self.entries.entry(key)
    }

    /// Insert a node, replacing any previous node under the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    pub fn iter(&self) -> Iter<'_, String, Node> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Keys<'_, String, Node> {
        self.entries.keys()
    }

    pub fn section(&self, key: &str) -> Option<&ParameterTree> {
        self.get(key).and_then(Node::as_section)
    }

    /// The global bucket, if any `set` line appeared outside a subsection.
    pub fn global(&self) -> Option<&ParameterTree> {
        self.section(GLOBAL_SECTION)
    }

    /// Look up a leaf value by its path of section names followed by the key.
    ///
    /// ```ignore
    /// tree.value(&["Geometry model", "Box", "X extent"])
    /// ```
    pub fn value(&self, path: &[&str]) -> Option<&str> {
        let (key, sections) = path.split_last()?;
        let mut current = self;
        for name in sections {
            current = current.section(name)?;
        }
        current
            .get(key)
            .and_then(Node::as_leaf)
            .map(|leaf| leaf.value.as_str())
    }

    /// Builder-style helper: add a leaf.
    pub fn with_leaf(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Node::Leaf(Leaf::new(value)));
        self
    }

    /// Builder-style helper: add a nested section.
    pub fn with_section(mut self, key: impl Into<String>, section: ParameterTree) -> Self {
        self.insert(key, Node::Section(section));
        self
    }

    /// Total number of leaves in this tree and all nested sections.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Leaf(_) => 1,
                Node::Section(section) => section.leaf_count(),
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a ParameterTree {
    type Item = (&'a String, &'a Node);
    type IntoIter = Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Path of section names leading to a node, displayed as `| Parent| Child`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// New path extended by one segment.
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "| {}", segment)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
