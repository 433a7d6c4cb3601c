//! Comparing parameter trees and prm files.

use std::path::Path;
use std::sync::Arc;

use gdmate::application::services::PrmService;
use gdmate::domain::{diff, format_diff, Difference, ParameterTree, Side, GLOBAL_SECTION};
use gdmate::infrastructure::traits::RealFileSystem;
use gdmate::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const RESOURCES: &str = "./tests/resources";

fn box_model(end_time: &str, box_name: &str) -> ParameterTree {
    ParameterTree::new()
        .with_section(
            GLOBAL_SECTION,
            ParameterTree::new()
                .with_leaf("Dimension", "2")
                .with_leaf("Use years in output instead of seconds", "true")
                .with_leaf("End time", end_time)
                .with_leaf("Output directory", "output"),
        )
        .with_section(
            "Geometry model",
            ParameterTree::new().with_leaf("Model name", "box").with_section(
                box_name,
                ParameterTree::new()
                    .with_leaf("X extent", "4.2e6")
                    .with_leaf("Y extent", "3e6"),
            ),
        )
}

#[test]
fn given_changed_value_and_renamed_section_when_diffing_then_reports_both_directions() {
    let a = box_model("4e10", "Box");
    let b = box_model("3e10", "Box with lithosphere boundary indicators");

    let differences = diff(&a, &b);

    let expected = "<| Global parameters| End time>\n\
                    \x20   value = 4e10 (input 1)\n\
                    \x20   value = 3e10 (input 2) \n\n\
                    <| Geometry model| Box> found in input 1 but not in input 2\n\n\
                    <| Geometry model| Box with lithosphere boundary indicators> found in input 2 but not in input 1\n\n";
    assert_eq!(format_diff(&differences), expected);
}

#[test]
fn given_identical_trees_when_diffing_then_no_differences() {
    let a = box_model("4e10", "Box");
    assert!(diff(&a, &a.clone()).is_empty());
    assert_eq!(format_diff(&[]), "");
}

#[test]
fn given_same_entries_in_other_order_when_diffing_then_no_differences() {
    let a = ParameterTree::new()
        .with_leaf("Dimension", "2")
        .with_leaf("End time", "1e6");
    let b = ParameterTree::new()
        .with_leaf("End time", "1e6")
        .with_leaf("Dimension", "2");
    assert!(diff(&a, &b).is_empty());
    assert_eq!(a, b);
}

#[test]
fn given_section_against_leaf_when_diffing_then_kind_difference() {
    let a = ParameterTree::new().with_section("Particles", ParameterTree::new());
    let b = ParameterTree::new().with_leaf("Particles", "1000");

    let differences = diff(&a, &b);

    assert_eq!(differences.len(), 1);
    assert!(matches!(
        &differences[0],
        Difference::Kind { section_in: Side::Input1, .. }
    ));
    assert_eq!(differences[0].path().to_string(), "| Particles");
}

#[test]
fn given_two_prm_files_when_diffing_then_prints_expected_report() {
    let service = PrmService::new(Arc::new(RealFileSystem));

    let differences = service
        .diff_files(
            &Path::new(RESOURCES).join("test_f1.prm"),
            &Path::new(RESOURCES).join("test_f2.prm"),
        )
        .unwrap();

    let expected = concat!(
        "<| Global parameters| End time>\n",
        "    value = 3e10 (input 1)\n",
        "    value = 5e10 (input 2) \n\n",
        "<| Initial temperature model| Function| Function constants>\n",
        "    value = p=-0.01, L=4.2e6, D=3e6, pi=3.1415926536, k=1, T_top=273, T_bottom=3600 (input 1)\n",
        "    value = p=-0.01, L=4.2e6, D=3e6, pi=3.1415926536, k=1, T_top=293, T_bottom=3600 (input 2) \n\n",
        "<| Postprocess| List of postprocessors>\n",
        "    value = velocity statistics, temperature statistics, heat flux statistics, visualization, particles, basic statistics (input 1)\n",
        "    value = velocity statistics, temperature statistics, heat flux statistics, visualization, basic statistics (input 2) \n\n",
        "<| Postprocess| Particles> found in input 1 but not in input 2\n\n",
    );
    assert_eq!(format_diff(&differences), expected);
}
