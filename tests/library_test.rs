//! Name checks against the parameter library.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use gdmate::application::services::PrmService;
use gdmate::application::{import_prm_library, ParameterLibrary};
use gdmate::domain::{format_unrecognised, ParameterTree, GLOBAL_SECTION};
use gdmate::infrastructure::traits::RealFileSystem;
use gdmate::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn box_model(dimension_name: &str) -> ParameterTree {
    ParameterTree::new()
        .with_section(
            GLOBAL_SECTION,
            ParameterTree::new()
                .with_leaf(dimension_name, "2")
                .with_leaf("Use years in output instead of seconds", "true")
                .with_leaf("End time", "4e10")
                .with_leaf("Output directory", "output"),
        )
        .with_section(
            "Geometry model",
            ParameterTree::new().with_leaf("Model name", "box").with_section(
                "Box",
                ParameterTree::new()
                    .with_leaf("X extent", "4.2e6")
                    .with_leaf("Y extent", "3e6"),
            ),
        )
}

#[test]
fn given_misspelled_global_when_checking_then_reported() {
    let library = ParameterLibrary::bundled().unwrap();

    let unknown = library.unrecognised(&box_model("Dimensions"));

    assert_eq!(unknown, vec!["Dimensions"]);
    assert_eq!(
        format_unrecognised(&unknown),
        "Unrecognised parameters: \n\t-> Dimensions\n"
    );
}

#[test]
fn given_known_names_when_checking_then_nothing_reported() {
    let library = ParameterLibrary::bundled().unwrap();
    assert!(library.unrecognised(&box_model("Dimension")).is_empty());
}

#[test]
fn given_all_test_resources_when_checking_then_names_recognised() {
    let library = ParameterLibrary::bundled().unwrap();
    let service = PrmService::new(Arc::new(RealFileSystem));

    for name in ["short_test_f.prm", "test_f1.prm", "test_f2.prm"] {
        let tree = service
            .load(&Path::new("./tests/resources").join(name))
            .unwrap();
        assert!(library.unrecognised(&tree).is_empty(), "{name}");
    }
}

#[test]
fn given_empty_target_when_importing_then_populated() {
    let mut library = ParameterTree::new();
    import_prm_library(&mut library).unwrap();
    assert!(!library.is_empty());
}

#[test]
fn given_library_file_when_loading_then_used_as_reference() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("parameters.prm");
    std::fs::write(
        &path,
        "set Dimensions = 2\nsubsection Geometry_20model\n  set Model_20name = box\nend\n",
    )
    .unwrap();

    let library = ParameterLibrary::load(&RealFileSystem, &path).unwrap();

    assert_eq!(
        library.tree().value(&["Geometry model", "Model name"]),
        Some("box")
    );
    assert_eq!(
        library.unrecognised(&box_model("Dimensions")),
        vec![
            "Use years in output instead of seconds",
            "End time",
            "Output directory"
        ]
    );
}
