//! Rendering of parameter trees back into prm text.

use std::io::{self, Write};

use crate::domain::tree::{Node, ParameterTree, GLOBAL_SECTION};

const INDENT: &str = "  ";

/// Render `tree` as prm lines.
///
/// The global bucket is emitted first at depth 0 without a `subsection`
/// wrapper; other sections follow in tree order, indented two spaces per level.
/// A global bucket that is empty or holds sections keeps its wrapper, since
/// bare lines at depth 0 could not bring those back.
pub fn render(tree: &ParameterTree) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(global) = tree.global() {
        if global.is_empty() || global.iter().any(|(_, node)| node.is_section()) {
            render_section(GLOBAL_SECTION, global, 0, &mut lines);
        } else {
            render_entries(global, 0, &mut lines);
        }
    }
    for (key, node) in tree {
        if key == GLOBAL_SECTION && node.is_section() {
            continue;
        }
        render_node(key, node, 0, &mut lines);
    }
    lines
}

fn render_entries(tree: &ParameterTree, depth: usize, lines: &mut Vec<String>) {
    for (key, node) in tree {
        render_node(key, node, depth, lines);
    }
}

fn render_node(key: &str, node: &Node, depth: usize, lines: &mut Vec<String>) {
    match node {
        Node::Leaf(leaf) => lines.push(format!(
            "{}set {} = {}",
            INDENT.repeat(depth),
            escape_hash(key),
            escape_line_end(&leaf.value)
        )),
        Node::Section(section) => render_section(key, section, depth, lines),
    }
}

fn render_section(key: &str, section: &ParameterTree, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    lines.push(format!("{indent}subsection {}", escape_line_end(key)));
    render_entries(section, depth + 1, lines);
    lines.push(format!("{indent}end"));
}

/// `#` would start a comment.
fn escape_hash(text: &str) -> String {
    text.replace('#', r"\#")
}

/// Like [`escape_hash`], and a final `\` is doubled so it is not read as a
/// line continuation.
fn escape_line_end(text: &str) -> String {
    let mut out = escape_hash(text);
    if out.ends_with('\\') {
        out.push('\\');
    }
    out
}

/// Rendered text, every line newline-terminated.
pub fn to_prm_string(tree: &ParameterTree) -> String {
    render(tree)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

/// Write the rendered text to `writer`.
pub fn write_to<W: Write>(tree: &ParameterTree, writer: &mut W) -> io::Result<()> {
    for line in render(tree) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}
