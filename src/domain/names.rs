//! Cross-check of parameter names against a reference tree.

use crate::domain::tree::{ParameterTree, GLOBAL_SECTION};

/// Names in `tree` that `reference` does not know.
///
/// Checked at the granularity of the reference: the direct keys of the global
/// bucket plus every other top-level section name. Nested keys are not checked.
pub fn unrecognised_names(tree: &ParameterTree, reference: &ParameterTree) -> Vec<String> {
    let known_globals = reference.global();
    let mut unknown = Vec::new();

    for (key, node) in tree {
        match node.as_section() {
            Some(global) if key == GLOBAL_SECTION => {
                for name in global.keys() {
                    if !known_globals.is_some_and(|g| g.contains_key(name)) {
                        unknown.push(name.clone());
                    }
                }
            }
            _ => {
                if !reference.contains_key(key) {
                    unknown.push(key.clone());
                }
            }
        }
    }
    unknown
}

/// Render the report printed for unrecognised names; empty when there are none.
pub fn format_unrecognised(names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    let mut out = String::from("Unrecognised parameters: \n");
    for name in names {
        out.push_str("\t-> ");
        out.push_str(name);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ParameterTree {
        ParameterTree::new()
            .with_section(
                GLOBAL_SECTION,
                ParameterTree::new()
                    .with_leaf("Dimension", "2")
                    .with_leaf("End time", "5.69e+300"),
            )
            .with_section("Geometry model", ParameterTree::new())
    }

    #[test]
    fn given_misspelled_global_when_checking_then_reported() {
        let tree = ParameterTree::new()
            .with_section(
                GLOBAL_SECTION,
                ParameterTree::new()
                    .with_leaf("Dimensions", "2")
                    .with_leaf("End time", "4e10"),
            )
            .with_section(
                "Geometry model",
                ParameterTree::new().with_leaf("Not checked", "x"),
            );

        let unknown = unrecognised_names(&tree, &reference());

        assert_eq!(unknown, vec!["Dimensions"]);
        assert_eq!(
            format_unrecognised(&unknown),
            "Unrecognised parameters: \n\t-> Dimensions\n"
        );
    }

    #[test]
    fn given_unknown_section_when_checking_then_reported() {
        let tree = ParameterTree::new().with_section("Geometry modell", ParameterTree::new());
        assert_eq!(unrecognised_names(&tree, &reference()), vec!["Geometry modell"]);
    }

    #[test]
    fn given_all_known_when_checking_then_nothing_to_report() {
        let tree = ParameterTree::new()
            .with_section(GLOBAL_SECTION, ParameterTree::new().with_leaf("Dimension", "3"));
        let unknown = unrecognised_names(&tree, &reference());
        assert!(unknown.is_empty());
        assert_eq!(format_unrecognised(&unknown), "");
    }
}
