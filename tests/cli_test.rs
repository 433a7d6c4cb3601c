//! Exit codes of the command line, run in-process.

use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use gdmate::cli::{execute_command, Cli, CliError, CliResult};
use gdmate::config::local_config_path;
use gdmate::exitcode;
use gdmate::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn resource(name: &str) -> String {
    Path::new("./tests/resources")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Helper to create temp prm files for testing
fn create_prm_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write prm file");
    path.to_string_lossy().into_owned()
}

/// Run gdmate with `project` as the config directory.
fn run(project: &TempDir, args: &[&str]) -> CliResult<i32> {
    let project_dir = project.path().to_string_lossy().into_owned();
    let argv = ["gdmate", "-C", project_dir.as_str()]
        .into_iter()
        .chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).expect("valid command line");
    execute_command(&cli)
}

#[rstest]
#[case::differing_with_flag(&["--exit-code"], "test_f2.prm", exitcode::FINDINGS)]
#[case::identical_with_flag(&["--exit-code"], "test_f1.prm", exitcode::OK)]
#[case::differing_without_flag(&[], "test_f2.prm", exitcode::OK)]
fn given_two_files_when_diffing_then_exit_code_reflects_differences(
    #[case] flags: &[&str],
    #[case] other: &str,
    #[case] expected: i32,
) {
    let project = TempDir::new().unwrap();
    let a = resource("test_f1.prm");
    let b = resource(other);
    let mut args = vec!["prm", "diff"];
    args.extend_from_slice(flags);
    args.push(a.as_str());
    args.push(b.as_str());

    assert_eq!(run(&project, &args).unwrap(), expected);
}

#[test]
fn given_unknown_name_when_checking_then_findings() {
    let project = TempDir::new().unwrap();
    let file = create_prm_file(&project, "run.prm", "set Dimensions = 2\nset End time = 1e6\n");

    assert_eq!(
        run(&project, &["prm", "check", file.as_str()]).unwrap(),
        exitcode::FINDINGS
    );
}

#[test]
fn given_known_names_when_checking_then_ok() {
    let project = TempDir::new().unwrap();
    let file = resource("short_test_f.prm");

    assert_eq!(run(&project, &["prm", "check", file.as_str()]).unwrap(), exitcode::OK);
}

#[test]
fn given_existing_local_config_when_init_again_then_usage_error() {
    let project = TempDir::new().unwrap();

    assert_eq!(run(&project, &["config", "init"]).unwrap(), exitcode::OK);
    let config_path: PathBuf = local_config_path(project.path());
    let written = std::fs::read_to_string(&config_path).unwrap();

    let err = run(&project, &["config", "init"]).unwrap_err();

    assert!(matches!(err, CliError::Usage(_)), "{err:?}");
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert_eq!(std::fs::read_to_string(&config_path).unwrap(), written);
}

#[test]
fn given_missing_input_when_showing_then_noinput() {
    let project = TempDir::new().unwrap();
    let missing = project.path().join("missing.prm");
    let missing_arg = missing.to_string_lossy().into_owned();

    let err = run(&project, &["prm", "show", missing_arg.as_str()]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_malformed_input_when_formatting_then_dataerr_and_file_untouched() {
    let project = TempDir::new().unwrap();
    let file = create_prm_file(&project, "bad.prm", "set Dimension = 2\nnot prm\n");

    let err = run(&project, &["prm", "fmt", file.as_str()]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "set Dimension = 2\nnot prm\n"
    );
}

#[test]
fn given_padded_file_when_formatting_to_output_then_normalized_copy_written() {
    let project = TempDir::new().unwrap();
    let out = project.path().join("out/short.prm");
    let out_arg = out.to_string_lossy().into_owned();
    let file = resource("short_test_f.prm");

    let code = run(&project, &["prm", "fmt", file.as_str(), "-o", out_arg.as_str()]).unwrap();

    assert_eq!(code, exitcode::OK);
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("set Dimension = 2\n"), "{text}");
    assert!(text.contains("\n  subsection Box\n"), "{text}");
}
