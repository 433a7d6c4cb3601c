//! Domain layer: prm trees, their algorithms, and flow-law constants
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod builder;
pub mod diff;
pub mod error;
pub mod flow_law;
pub mod grammar;
pub mod merge;
pub mod names;
pub mod normalize;
pub mod render;
pub mod tree;

pub use builder::{parse, TreeBuilder};
pub use diff::{diff, format_diff, Difference, Side};
pub use error::{DomainError, DomainResult};
pub use flow_law::{AspectFlowLaw, Creep, FlowLaw, Material, Source, Water};
pub use grammar::{tokenize, LineKind, Token, Tokenizer};
pub use merge::{merge, merged};
pub use names::{format_unrecognised, unrecognised_names};
pub use normalize::{decode_key, normalize_keys, rekey};
pub use render::{render, to_prm_string, write_to};
pub use tree::{KeyPath, Leaf, Node, ParameterTree, GLOBAL_SECTION};
