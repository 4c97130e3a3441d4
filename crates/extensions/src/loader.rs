//! Loading every extension of a directory into a platform.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::error::ExtensionLoadError;
use crate::file::ExtensionFile;
use crate::options::LoaderOptions;
use crate::platform::{ModuleOpener, Platform, FACTORY_SYMBOL};

/// Outcome of [`ExtensionsLoader::load_all_extensions`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of the extensions registered with the platform.
    pub loaded: Vec<String>,
    /// Extension files skipped because they lack the factory symbol
    /// (forgiving loading only).
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<ExtensionLoadError>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ExtensionsLoader<O> {
    opener: O,
    options: LoaderOptions,
}

impl<O: ModuleOpener> ExtensionsLoader<O> {
    pub fn new(opener: O, options: LoaderOptions) -> Self {
        Self { opener, options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn into_opener(self) -> O {
        self.opener
    }

    /// Load every extension file of `directory` built for the configured OS
    /// and edit-time flag, then finish with
    /// [`Self::extensions_loading_done`].
    ///
    /// Files are visited in path order. Individual failures are logged and
    /// collected in the report; only an unreadable directory is an error.
    pub fn load_all_extensions(
        &mut self,
        directory: &Path,
        platform: &mut dyn Platform,
    ) -> Result<LoadReport, ExtensionLoadError> {
        let read_dir_error = |source| ExtensionLoadError::ReadDirectory {
            path: directory.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(directory).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if let Some(file) = ExtensionFile::parse(&path) {
                if file.matches(self.options.target_os, self.options.edittime) {
                    files.push(file);
                }
            }
        }
        files.sort_by(|a, b| a.path().cmp(b.path()));

        let mut report = LoadReport::default();
        for file in files {
            match self.load_extension(file.path(), platform) {
                Ok(Some(name)) => report.loaded.push(name),
                Ok(None) => report.skipped.push(file.path().to_path_buf()),
                Err(err) => report.failures.push(err),
            }
        }

        self.extensions_loading_done(directory);
        info!(
            directory = %directory.display(),
            platform = platform.name(),
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "extensions loaded"
        );
        Ok(report)
    }

    /// Load one extension file and register it with `platform`.
    ///
    /// Returns the extension name, or `None` when the file has no factory
    /// and loading is forgiving.
    pub fn load_extension(
        &mut self,
        path: &Path,
        platform: &mut dyn Platform,
    ) -> Result<Option<String>, ExtensionLoadError> {
        match self.try_load(path, platform) {
            Ok(name) => {
                debug!(path = %path.display(), name = %name, "extension loaded");
                Ok(Some(name))
            }
            Err(err) if self.options.forgiving && err.is_missing_factory() => {
                debug!(path = %path.display(), "not an extension for this platform, skipped");
                Ok(None)
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "unable to load extension");
                Err(err)
            }
        }
    }

    fn try_load(
        &mut self,
        path: &Path,
        platform: &mut dyn Platform,
    ) -> Result<String, ExtensionLoadError> {
        if !path.is_file() {
            return Err(ExtensionLoadError::FileNotFound(path.to_path_buf()));
        }
        let module = self
            .opener
            .open(path)
            .map_err(|source| ExtensionLoadError::ModuleOpen {
                path: path.to_path_buf(),
                source,
            })?;
        let extension = module
            .create_extension(FACTORY_SYMBOL)
            .map_err(|source| ExtensionLoadError::from_factory(path.to_path_buf(), source))?;

        let name = extension.name().to_string();
        if !platform.add_extension(extension) {
            return Err(ExtensionLoadError::Rejected {
                path: path.to_path_buf(),
                platform: platform.name().to_string(),
                name,
            });
        }
        Ok(name)
    }

    /// Finish loading from `directory`.
    pub fn extensions_loading_done(&mut self, directory: &Path) {
        debug!(directory = %directory.display(), "finalizing extensions loading");
        self.opener.loading_done(directory);
    }
}
