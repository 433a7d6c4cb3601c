//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::PrmService;
use crate::application::{ApplicationResult, ParameterLibrary};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Prm file service
    pub prm: PrmService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let prm = PrmService::new(Arc::clone(&fs));

        Self { settings, fs, prm }
    }

    /// Reference library for name checks.
    ///
    /// The file configured in `settings.library` if any, the bundled one otherwise.
    pub fn library(&self) -> ApplicationResult<Cow<'static, ParameterLibrary>> {
        match &self.settings.library {
            Some(path) => {
                debug!("using parameter library {}", path.display());
                ParameterLibrary::load(self.fs.as_ref(), path).map(Cow::Owned)
            }
            None => Ok(Cow::Borrowed(ParameterLibrary::bundled()?)),
        }
    }
}
