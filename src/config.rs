//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gdmate/gdmate.toml`
//! 3. Local config: `<project_dir>/.gdmate.toml`
//! 4. Environment variables: `GDMATE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for gdmate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Reference prm document for name checks (default: bundled library)
    pub library: Option<PathBuf>,
    /// Warn about unrecognised parameter names when loading prm files
    pub check_names: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library: None,
            check_names: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub library: Option<PathBuf>,
    pub check_names: Option<bool>,
}

/// Get the XDG config directory for gdmate.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gdmate").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gdmate.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".gdmate.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the library path.
    ///
    /// Unresolvable variables leave the path as written.
    fn expand_paths(&mut self) {
        if let Some(library) = &self.library {
            let raw = library.to_string_lossy();
            if let Ok(expanded) = shellexpand::full(raw.as_ref()) {
                self.library = Some(PathBuf::from(expanded.as_ref()));
            }
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            library: overlay.library.clone().or_else(|| self.library.clone()),
            check_names: overlay.check_names.unwrap_or(self.check_names),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.gdmate.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply GDMATE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("GDMATE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("library") {
            settings.library = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("check_names") {
            settings.check_names = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gdmate configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/gdmate/gdmate.toml
#   Local:  ./.gdmate.toml
#   Env:    GDMATE_* environment variables (GDMATE_LIBRARY, GDMATE_CHECK_NAMES)

# Reference prm document used to recognise parameter names.
# Names are mangled as in ASPECT's parameters.prm (`End_20time`).
# Defaults to the library bundled with gdmate.
# library = "~/aspect/output/parameters.prm"

# Warn about unrecognised parameter names when reading prm files
# check_names = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_defaults_when_created_then_bundled_library_and_checks_on() {
        let settings = Settings::default();
        assert_eq!(settings.library, None);
        assert!(settings.check_names);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_kept() {
        let base = Settings {
            library: Some(PathBuf::from("/opt/aspect/parameters.prm")),
            check_names: true,
        };
        let overlay = RawSettings {
            library: None,
            check_names: Some(false),
        };

        let result = base.merge_with(&overlay);

        assert_eq!(
            result.library,
            Some(PathBuf::from("/opt/aspect/parameters.prm"))
        );
        assert!(!result.check_names);
    }

    #[test]
    fn given_tilde_in_library_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            library: Some(PathBuf::from("~/parameters.prm")),
            check_names: true,
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let library = settings.library.unwrap();
        assert!(library.to_string_lossy().starts_with(&home));
        assert!(!library.to_string_lossy().contains('~'));
    }

    #[test]
    fn given_local_config_file_when_loading_raw_then_fields_parsed() {
        let temp = TempDir::new().unwrap();
        let path = local_config_path(temp.path());
        std::fs::write(&path, "library = \"/tmp/lib.prm\"\ncheck_names = false\n").unwrap();

        let raw = load_raw_settings(&path).unwrap();

        assert_eq!(raw.library, Some(PathBuf::from("/tmp/lib.prm")));
        assert_eq!(raw.check_names, Some(false));
    }

    #[test]
    fn given_invalid_toml_when_loading_raw_then_config_error() {
        let temp = TempDir::new().unwrap();
        let path = local_config_path(temp.path());
        std::fs::write(&path, "check_names = [\n").unwrap();

        let result = load_raw_settings(&path);

        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_template_when_parsed_then_yields_no_overrides() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.library.is_none());
        assert!(raw.check_names.is_none());
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_check_names() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("check_names = true"));
    }
}
