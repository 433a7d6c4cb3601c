//! gdmate: helpers for geodynamic modeling with ASPECT
//!
//! Reads ASPECT parameter (`.prm`) files into ordered trees, merges, diffs,
//! prints and name-checks them, and converts published flow-law constants
//! into the form ASPECT expects.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
