//! Decoding of mangled parameter names.
//!
//! Generated parameter references encode every character that is not a letter
//! or digit as `_` followed by two hex digits (`_20` for a space, `_2d` for a
//! hyphen). Plain names pass through untouched.

use crate::domain::tree::{Node, ParameterTree};

/// Decode `_XX` escapes of non-alphanumeric ASCII characters.
///
/// Sequences that do not decode to such a character are kept as they are.
pub fn decode_key(key: &str) -> String {
    let bytes = key.as_bytes();
    let mut out = String::with_capacity(key.len());
    let mut i = 0;
    while i < key.len() {
        if bytes[i] == b'_' && i + 3 <= bytes.len() {
            if let Some(c) = decode_escape(&bytes[i + 1..i + 3]) {
                out.push(c);
                i += 3;
                continue;
            }
        }
        match key[i..].chars().next() {
            Some(c) => {
                out.push(c);
                i += c.len_utf8();
            }
            None => break,
        }
    }
    out
}

fn decode_escape(hex: &[u8]) -> Option<char> {
    let text = std::str::from_utf8(hex).ok()?;
    let code = u8::from_str_radix(text, 16).ok()?;
    let c = char::from(code);
    (c.is_ascii_punctuation() || c == ' ').then_some(c)
}

/// Copy `src` into `dst` with every key decoded, recursing into sections.
pub fn rekey(src: &ParameterTree, dst: &mut ParameterTree) {
    for (key, node) in src {
        let decoded = decode_key(key);
        let node = match node {
            Node::Section(section) => {
                let mut child = ParameterTree::new();
                rekey(section, &mut child);
                Node::Section(child)
            }
            Node::Leaf(leaf) => Node::Leaf(leaf.clone()),
        };
        dst.insert(decoded, node);
    }
}

/// Decoded copy of `tree`.
pub fn normalize_keys(tree: &ParameterTree) -> ParameterTree {
    let mut out = ParameterTree::new();
    rekey(tree, &mut out);
    out
}
