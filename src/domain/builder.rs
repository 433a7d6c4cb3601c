//! Builds a [`ParameterTree`] from tokenized prm lines.

use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::grammar::{LineKind, Token, Tokenizer};
use crate::domain::tree::{KeyPath, Leaf, Node, ParameterTree, GLOBAL_SECTION};

/// Constructs parameter trees from prm lines.
///
/// Keeps a stack of open section names. `subsection X` pushes `X` and
/// descends into (or creates) the child section, `set K = V` stores a leaf
/// under the innermost open section, `end` pops. `set` lines outside any
/// section land in the [`GLOBAL_SECTION`] bucket.
#[derive(Default)]
pub struct TreeBuilder {
    tokenizer: Tokenizer,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and build in one step.
    pub fn build_from_str(&self, content: &str) -> DomainResult<ParameterTree> {
        let tokens = self.tokenizer.tokenize(content)?;
        self.build(&tokens)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, tokens: &[Token]) -> DomainResult<ParameterTree> {
        let mut root = ParameterTree::new();
        let mut open: Vec<String> = Vec::new();

        for token in tokens {
            match &token.kind {
                LineKind::Subsection(name) => {
                    let parent = section_at(&mut root, &open, token.line)?;
                    let node = parent
                        .entry(name.clone())
                        .or_insert_with(|| Node::Section(ParameterTree::new()));
                    if !node.is_section() {
                        return Err(kind_mismatch(&open, name));
                    }
                    open.push(name.clone());
                }
                LineKind::Set { name, value } => {
                    let (section, path) = if open.is_empty() {
                        let global = vec![GLOBAL_SECTION.to_string()];
                        (section_at(&mut root, &global, token.line)?, global)
                    } else {
                        (section_at(&mut root, &open, token.line)?, open.clone())
                    };
                    if section.get(name).is_some_and(Node::is_section) {
                        return Err(kind_mismatch(&path, name));
                    }
                    section.insert(name.clone(), Node::Leaf(Leaf::new(value.clone())));
                }
                LineKind::End => {
                    if open.pop().is_none() {
                        return Err(DomainError::UnbalancedSection {
                            line: token.line,
                            message: "'end' without matching 'subsection'".to_string(),
                        });
                    }
                }
            }
        }

        if let Some(unclosed) = open.last() {
            let line = tokens.last().map(|t| t.line).unwrap_or(0);
            return Err(DomainError::UnbalancedSection {
                line,
                message: format!("{} section(s) not closed, innermost '{}'", open.len(), unclosed),
            });
        }

        debug!(
            "built tree: {} top-level entries, {} parameters",
            root.len(),
            root.leaf_count()
        );
        Ok(root)
    }
}

/// Parse prm text into a tree.
pub fn parse(content: &str) -> DomainResult<ParameterTree> {
    TreeBuilder::new().build_from_str(content)
}

/// Walk (creating as needed) to the section addressed by `path`.
fn section_at<'a>(
    root: &'a mut ParameterTree,
    path: &[String],
    line: usize,
) -> DomainResult<&'a mut ParameterTree> {
    let mut current = root;
    for (depth, name) in path.iter().enumerate() {
        let node = current
            .entry(name.clone())
            .or_insert_with(|| Node::Section(ParameterTree::new()));
        current = match node {
            Node::Section(section) => section,
            Node::Leaf(_) => {
                warn!("line {}: '{}' is a parameter, not a section", line, name);
                return Err(kind_mismatch(&path[..depth], name));
            }
        };
    }
    Ok(current)
}

fn kind_mismatch(parents: &[String], name: &str) -> DomainError {
    let path: KeyPath = parents.iter().map(String::as_str).chain([name]).collect();
    DomainError::KindMismatch {
        path: path.to_string(),
    }
}
