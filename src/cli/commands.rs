//! Command dispatch: one handler per subcommand

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands, FlowCommands, PrmCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::flow_law::catalog;
use crate::domain::{
    format_diff, format_unrecognised, to_prm_string, write_to, AspectFlowLaw, Node, ParameterTree,
};
use crate::exitcode;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Label for name warnings about a merge result, which spans several files.
const MERGED_LABEL: &str = "merged result";

/// Run the parsed command line and return the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        Some(Commands::Flow { command }) => execute_flow(command),
        Some(Commands::Prm { command }) => {
            let container = build_container(cli)?;
            execute_prm(&container, command)
        }
        Some(Commands::Config { command }) => {
            let container = build_container(cli)?;
            execute_config(&container, &project_dir(cli)?, command)
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(exitcode::OK)
        }
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(Some(dir.as_path()))?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

// ============================================================
// prm
// ============================================================

fn execute_prm(container: &ServiceContainer, command: &PrmCommands) -> CliResult<i32> {
    match command {
        PrmCommands::Show { file } => {
            let tree = load_checked(container, file)?;
            let mut stdout = io::stdout().lock();
            write_to(&tree, &mut stdout)
                .and_then(|_| stdout.flush())
                .map_err(|e| InfraError::io("write to stdout", e))?;
            Ok(exitcode::OK)
        }
        PrmCommands::Fmt { file, output: out } => {
            let tree = load_checked(container, file)?;
            let target = out.as_deref().unwrap_or(file);
            container.prm.save(&tree, target)?;
            output::action("Formatted", &target.display());
            Ok(exitcode::OK)
        }
        PrmCommands::Diff { a, b, exit_code } => {
            let differences = container.prm.diff_files(a, b)?;
            print!("{}", format_diff(&differences));
            if *exit_code && !differences.is_empty() {
                return Ok(exitcode::FINDINGS);
            }
            Ok(exitcode::OK)
        }
        PrmCommands::Merge {
            base,
            overlays,
            output: out,
        } => {
            let tree = container.prm.merge_files(base, overlays)?;
            warn_unrecognised(container, MERGED_LABEL, &tree)?;
            match out {
                Some(path) => {
                    container.prm.save(&tree, path)?;
                    output::action("Merged", &path.display());
                }
                None => print!("{}", to_prm_string(&tree)),
            }
            Ok(exitcode::OK)
        }
        PrmCommands::Check { file } => {
            let tree = container.prm.load(file)?;
            let unknown = container.library()?.unrecognised(&tree);
            if unknown.is_empty() {
                output::success(&format!("{}: all names recognised", file.display()));
                return Ok(exitcode::OK);
            }
            print!("{}", format_unrecognised(&unknown));
            Ok(exitcode::FINDINGS)
        }
        PrmCommands::Tree { file } => {
            let tree = load_checked(container, file)?;
            output::info(&section_tree(file.display().to_string(), &tree));
            Ok(exitcode::OK)
        }
    }
}

/// Load a prm file, warning about unknown names when enabled.
#[instrument(level = "debug", skip(container))]
fn load_checked(container: &ServiceContainer, path: &Path) -> CliResult<ParameterTree> {
    let tree = container.prm.load(path)?;
    warn_unrecognised(container, &path.display().to_string(), &tree)?;
    Ok(tree)
}

fn warn_unrecognised(
    container: &ServiceContainer,
    label: &str,
    tree: &ParameterTree,
) -> CliResult<()> {
    if let Some(message) = unrecognised_warning(container, label, tree)? {
        output::warning(&message);
    }
    Ok(())
}

/// Warning text for names the reference library does not know, if any.
fn unrecognised_warning(
    container: &ServiceContainer,
    label: &str,
    tree: &ParameterTree,
) -> CliResult<Option<String>> {
    if !container.settings.check_names {
        return Ok(None);
    }
    let unknown = container.library()?.unrecognised(tree);
    if unknown.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!(
        "{}: unrecognised parameters: {}",
        label,
        unknown.iter().join(", ")
    )))
}

fn section_tree(label: String, tree: &ParameterTree) -> Tree<String> {
    let children = tree.iter().map(|(key, node)| match node {
        Node::Section(section) => section_tree(key.clone(), section),
        Node::Leaf(leaf) => Tree::new(format!("{} = {}", key, leaf.value)),
    });
    Tree::new(label).with_leaves(children)
}

// ============================================================
// flow
// ============================================================

fn execute_flow(command: &FlowCommands) -> CliResult<i32> {
    match command {
        FlowCommands::Show {
            material,
            source,
            creep,
            water,
        } => {
            let law = AspectFlowLaw::lookup(*material, *source, *creep, *water)
                .map_err(ApplicationError::from)?;
            output::info(&law);
            Ok(exitcode::OK)
        }
        FlowCommands::List => {
            output::header(&format!(
                "{:<10} {:<8} {:<12} {:<4} {:>9} {:>4} {:>4} {:>4} {:>5} {:>4}",
                "material", "source", "creep", "h2o", "A", "n", "m", "r", "E", "V"
            ));
            for entry in catalog() {
                let law = entry.law;
                output::info(&format!(
                    "{:<10} {:<8} {:<12} {:<4} {:>9.2e} {:>4} {:>4} {:>4} {:>5} {:>4}",
                    entry.material.as_str(),
                    entry.source.as_str(),
                    entry.creep.as_str(),
                    entry.water.as_str(),
                    law.a,
                    law.n,
                    law.m,
                    law.r,
                    law.e,
                    law.v
                ));
            }
            Ok(exitcode::OK)
        }
    }
}

// ============================================================
// config
// ============================================================

fn execute_config(
    container: &ServiceContainer,
    project_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(exitcode::OK)
        }
        ConfigCommands::Path => {
            let global = global_config_path();
            let local = local_config_path(project_dir);
            let describe = |path: &Path| {
                let state = if container.fs.exists(path) {
                    "exists"
                } else {
                    "missing"
                };
                format!("{} ({})", path.display(), state)
            };
            match &global {
                Some(path) => output::detail(&format!("global: {}", describe(path))),
                None => output::detail(&"global: <no config directory>"),
            }
            output::detail(&format!("local:  {}", describe(&local)));
            Ok(exitcode::OK)
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| ApplicationError::Config {
                    message: "cannot determine global config directory".into(),
                })?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .with_path_context("create config directory", &path)?;
            container
                .fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::action("Created", &path.display());
            Ok(exitcode::OK)
        }
    }
}
