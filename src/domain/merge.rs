//! Deep merge of parameter trees.

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{KeyPath, Node, ParameterTree};

/// Deep-merge `src` into `dst`.
///
/// - key missing in `dst`: an independent copy of the `src` node is inserted
/// - both sections: merged recursively
/// - both leaves: the `src` value overwrites the `dst` value
/// - section meets leaf: [`DomainError::KindMismatch`]
///
/// On error `dst` is left exactly as it was. `src` is never modified.
#[instrument(level = "debug", skip_all)]
pub fn merge(dst: &mut ParameterTree, src: &ParameterTree) -> DomainResult<()> {
    let mut merged = dst.clone();
    merge_into(&mut merged, src, &KeyPath::root())?;
    *dst = merged;
    Ok(())
}

/// Merged copy of `base` with `overlay` applied on top.
pub fn merged(base: &ParameterTree, overlay: &ParameterTree) -> DomainResult<ParameterTree> {
    let mut out = base.clone();
    merge_into(&mut out, overlay, &KeyPath::root())?;
    Ok(out)
}

fn merge_into(dst: &mut ParameterTree, src: &ParameterTree, path: &KeyPath) -> DomainResult<()> {
    for (key, src_node) in src {
        let here = path.join(key);
        let Some(dst_node) = dst.get_mut(key) else {
            trace!("insert <{}>", here);
            dst.insert(key.clone(), src_node.clone());
            continue;
        };
        match (dst_node, src_node) {
            (Node::Section(dst_section), Node::Section(src_section)) => {
                merge_into(dst_section, src_section, &here)?;
            }
            (Node::Leaf(dst_leaf), Node::Leaf(src_leaf)) => {
                if dst_leaf.value != src_leaf.value {
                    trace!(
                        "overwrite <{}>: {} -> {}",
                        here,
                        dst_leaf.value,
                        src_leaf.value
                    );
                }
                dst_leaf.value.clone_from(&src_leaf.value);
            }
            _ => {
                return Err(DomainError::KindMismatch {
                    path: here.to_string(),
                })
            }
        }
    }
    Ok(())
}
