//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::{Creep, Material, Source, Water};

/// Geodynamics modeling helpers: ASPECT prm files and flow-law constants
#[derive(Parser, Debug)]
#[command(name = "gdmate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .gdmate.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read, normalize, compare and merge ASPECT prm files
    Prm {
        #[command(subcommand)]
        command: PrmCommands,
    },

    /// Flow-law constants converted for ASPECT
    Flow {
        #[command(subcommand)]
        command: FlowCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrmCommands {
    /// Print the file in normalized form
    Show {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Rewrite the file in normalized form
    Fmt {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Write here instead of in place
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Show parameter differences between two files
    Diff {
        /// Input 1
        #[arg(value_hint = ValueHint::FilePath)]
        a: PathBuf,
        /// Input 2
        #[arg(value_hint = ValueHint::FilePath)]
        b: PathBuf,
        /// Exit with 1 if the files differ
        #[arg(long)]
        exit_code: bool,
    },

    /// Merge overlays onto a base file, later overlays win
    Merge {
        #[arg(value_hint = ValueHint::FilePath)]
        base: PathBuf,
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        overlays: Vec<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List parameter names unknown to the reference library
    Check {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the section hierarchy
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum FlowCommands {
    /// Published, SI and ASPECT-scaled constants for one flow law
    Show {
        /// olivine, quartzite, anorthite
        material: Material,
        /// hirth, gleason, rybacki
        source: Source,
        /// dislocation, diffusion
        creep: Creep,
        /// dry, wet
        water: Water,
    },

    /// List all published flow laws
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
