//! Extension loading error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`crate::ModuleOpener`] when a file cannot be opened
/// as a dynamic module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct OpenError(pub String);

/// Failure reported by an [`crate::ExtensionModule`] when its factory symbol
/// cannot produce an extension.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoryError {
    #[error("symbol `{0}` not found")]
    Missing(String),
    #[error("symbol `{0}` does not have the expected signature")]
    Signature(String),
}

#[derive(Debug, Error)]
pub enum ExtensionLoadError {
    #[error("unable to read extensions directory {}: {source}", .path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("extension file {} does not exist", .0.display())]
    FileNotFound(PathBuf),
    #[error("unable to open {} as a module: {source}", .path.display())]
    ModuleOpen {
        path: PathBuf,
        #[source]
        source: OpenError,
    },
    #[error("{} has no extension factory: {source}", .path.display())]
    MissingFactory {
        path: PathBuf,
        #[source]
        source: FactoryError,
    },
    #[error("{} has an invalid extension factory: {source}", .path.display())]
    FactorySignature {
        path: PathBuf,
        #[source]
        source: FactoryError,
    },
    #[error("platform {platform} refused extension {name} from {}", .path.display())]
    Rejected {
        path: PathBuf,
        platform: String,
        name: String,
    },
}

impl ExtensionLoadError {
    /// Whether the file simply is not an extension for this platform. Only
    /// this kind of failure is silenced by forgiving loading.
    pub fn is_missing_factory(&self) -> bool {
        matches!(self, ExtensionLoadError::MissingFactory { .. })
    }

    pub(crate) fn from_factory(path: PathBuf, source: FactoryError) -> Self {
        match source {
            FactoryError::Missing(_) => ExtensionLoadError::MissingFactory { path, source },
            FactoryError::Signature(_) => ExtensionLoadError::FactorySignature { path, source },
        }
    }
}
