//! Structural comparison of two parameter trees.

use std::fmt;

use tracing::instrument;

use crate::domain::tree::{KeyPath, Node, ParameterTree};

/// Which of the two compared inputs a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input1,
    Input2,
}

impl Side {
    pub fn number(self) -> u8 {
        match self {
            Side::Input1 => 1,
            Side::Input2 => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::Input1 => Side::Input2,
            Side::Input2 => Side::Input1,
        }
    }
}

/// One reported difference between two trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// Leaf present in both inputs with different values.
    Value {
        path: KeyPath,
        left: String,
        right: String,
    },
    /// Section or leaf present in only one input.
    Missing { path: KeyPath, found_in: Side },
    /// Section in one input, leaf in the other.
    Kind { path: KeyPath, section_in: Side },
}

impl Difference {
    pub fn path(&self) -> &KeyPath {
        match self {
            Difference::Value { path, .. }
            | Difference::Missing { path, .. }
            | Difference::Kind { path, .. } => path,
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Value { path, left, right } => write!(
                f,
                "<{path}>\n    value = {left} (input 1)\n    value = {right} (input 2) \n\n"
            ),
            Difference::Missing { path, found_in } => write!(
                f,
                "<{path}> found in input {} but not in input {}\n\n",
                found_in.number(),
                found_in.other().number()
            ),
            Difference::Kind { path, section_in } => write!(
                f,
                "<{path}> is a section in input {} but a parameter in input {}\n\n",
                section_in.number(),
                section_in.other().number()
            ),
        }
    }
}

/// Compare `a` (input 1) with `b` (input 2).
///
/// At every level keys are visited in `a`'s order, then the keys only `b`
/// has. Identical paths produce nothing, so `diff(t, t)` is empty.
#[instrument(level = "debug", skip_all)]
pub fn diff(a: &ParameterTree, b: &ParameterTree) -> Vec<Difference> {
    let mut out = Vec::new();
    walk(a, b, &KeyPath::root(), &mut out);
    out
}

fn walk(a: &ParameterTree, b: &ParameterTree, path: &KeyPath, out: &mut Vec<Difference>) {
    for (key, a_node) in a {
        let here = path.join(key);
        match (a_node, b.get(key)) {
            (_, None) => out.push(Difference::Missing {
                path: here,
                found_in: Side::Input1,
            }),
            (Node::Section(a_section), Some(Node::Section(b_section))) => {
                walk(a_section, b_section, &here, out)
            }
            (Node::Leaf(a_leaf), Some(Node::Leaf(b_leaf))) => {
                if a_leaf.value != b_leaf.value {
                    out.push(Difference::Value {
                        path: here,
                        left: a_leaf.value.clone(),
                        right: b_leaf.value.clone(),
                    });
                }
            }
            (Node::Section(_), Some(Node::Leaf(_))) => out.push(Difference::Kind {
                path: here,
                section_in: Side::Input1,
            }),
            (Node::Leaf(_), Some(Node::Section(_))) => out.push(Difference::Kind {
                path: here,
                section_in: Side::Input2,
            }),
        }
    }

    for key in b.keys().filter(|key| !a.contains_key(key)) {
        out.push(Difference::Missing {
            path: path.join(key),
            found_in: Side::Input2,
        });
    }
}

/// Render differences as the text blocks printed by `prm diff`.
pub fn format_diff(differences: &[Difference]) -> String {
    differences.iter().map(ToString::to_string).collect()
}
