//! Reference library of recognised ASPECT parameter names.
//!
//! The bundled reference document uses the prm grammar with mangled names
//! (`End_20time`). It is parsed and decoded once per process and then shared
//! read-only.

use std::path::Path;
use std::sync::OnceLock;

use tracing::{debug, instrument};

use crate::application::error_ext::{DomainResultExt, IoResultExt};
use crate::application::ApplicationResult;
use crate::domain::{normalize_keys, parse, unrecognised_names, DomainResult, ParameterTree};
use crate::infrastructure::traits::FileSystem;

const BUNDLED_LIBRARY: &str = include_str!("../../assets/prm_library.prm");

static BUNDLED: OnceLock<ParameterLibrary> = OnceLock::new();

/// Decoded reference tree of known parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterLibrary {
    tree: ParameterTree,
}

impl ParameterLibrary {
    /// Parse a reference document and decode its names.
    pub fn parse(content: &str) -> DomainResult<Self> {
        let raw = parse(content)?;
        Ok(Self {
            tree: normalize_keys(&raw),
        })
    }

    /// The library shipped with gdmate, parsed on first use.
    pub fn bundled() -> DomainResult<&'static ParameterLibrary> {
        if let Some(library) = BUNDLED.get() {
            return Ok(library);
        }
        let library = Self::parse(BUNDLED_LIBRARY)?;
        debug!(
            "bundled parameter library: {} parameters",
            library.tree.leaf_count()
        );
        Ok(BUNDLED.get_or_init(|| library))
    }

    /// Load a reference document from disk.
    #[instrument(level = "debug", skip(fs))]
    pub fn load(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<Self> {
        let content = fs
            .read_to_string(path)
            .with_path_context("read parameter library", path)?;
        Self::parse(&content).in_document(path)
    }

    pub fn tree(&self) -> &ParameterTree {
        &self.tree
    }

    /// Copy the reference entries into `target`, which should be empty.
    pub fn import_into(&self, target: &mut ParameterTree) {
        for (key, node) in &self.tree {
            target.insert(key.clone(), node.clone());
        }
    }

    /// Names in `tree` this library does not know.
    pub fn unrecognised(&self, tree: &ParameterTree) -> Vec<String> {
        unrecognised_names(tree, &self.tree)
    }
}

/// Populate `target` with the bundled reference tree.
pub fn import_prm_library(target: &mut ParameterTree) -> ApplicationResult<()> {
    ParameterLibrary::bundled()?.import_into(target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GLOBAL_SECTION;

    #[test]
    fn given_bundled_document_when_importing_then_names_are_decoded() {
        let mut target = ParameterTree::new();
        import_prm_library(&mut target).unwrap();

        assert!(!target.is_empty());
        let globals = target.global().unwrap();
        assert!(globals.contains_key("Dimension"));
        assert!(globals.contains_key("Use years in output instead of seconds"));
        assert!(globals.contains_key("Max nonlinear iterations in pre-refinement"));
        assert!(target.contains_key("Geometry model"));
        assert_eq!(target.value(&["Geometry model", "Box", "X extent"]), Some("1"));
        assert!(!target.keys().any(|k| k.contains("_20")));
    }

    #[test]
    fn given_fresh_targets_when_importing_twice_then_identical() {
        let mut first = ParameterTree::new();
        let mut second = ParameterTree::new();
        import_prm_library(&mut first).unwrap();
        import_prm_library(&mut second).unwrap();
        assert_eq!(first, second);
        assert!(std::ptr::eq(
            ParameterLibrary::bundled().unwrap(),
            ParameterLibrary::bundled().unwrap()
        ));
    }

    #[test]
    fn given_custom_document_when_parsing_then_used_as_reference() {
        let library =
            ParameterLibrary::parse("set Dimension = 2\nsubsection Geometry_20model\nend\n")
                .unwrap();
        let tree = ParameterTree::new()
            .with_section(GLOBAL_SECTION, ParameterTree::new().with_leaf("CFL number", "1"))
            .with_section("Geometry model", ParameterTree::new());
        assert_eq!(library.unrecognised(&tree), vec!["CFL number"]);
    }
}
