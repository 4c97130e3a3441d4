//! Seams between the loader, the host's module loading and the platform
//! receiving extensions.

use std::path::Path;

use crate::error::{FactoryError, OpenError};

/// Symbol every extension module exports to build its extension.
pub const FACTORY_SYMBOL: &str = "CreateGDPlatformExtension";

/// An extension produced by a module's factory.
pub trait PlatformExtension {
    fn name(&self) -> &str;
}

/// The platform extensions are registered with.
pub trait Platform {
    fn name(&self) -> &str;

    /// Register `extension`. Returns `false` if the platform refuses it,
    /// for instance because an extension with the same name is present.
    fn add_extension(&mut self, extension: Box<dyn PlatformExtension>) -> bool;
}

/// An opened dynamic module.
pub trait ExtensionModule {
    /// Call the factory exported under `symbol`.
    fn create_extension(&self, symbol: &str) -> Result<Box<dyn PlatformExtension>, FactoryError>;
}

/// Opens files as dynamic modules. Implemented by the host on top of its
/// OS-level library loading.
pub trait ModuleOpener {
    fn open(&mut self, path: &Path) -> Result<Box<dyn ExtensionModule>, OpenError>;

    /// Called once every extension of `directory` is loaded. On Linux this is
    /// where symbols exported by extensions are made visible to each other.
    fn loading_done(&mut self, _directory: &Path) {}
}
