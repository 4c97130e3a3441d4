//! gd-core-extensions - discovery and registration of platform extensions.
//!
//! An [`ExtensionsLoader`] scans a directory for extension files named after
//! their target OS (see [`ExtensionFile`]), opens each through a host
//! supplied [`ModuleOpener`], calls the module's [`FACTORY_SYMBOL`] and
//! registers the resulting extension with a [`Platform`].

mod error;
mod file;
mod loader;
mod options;
mod platform;

pub use error::{ExtensionLoadError, FactoryError, OpenError};
pub use file::{extension_suffix, ExtensionFile, TargetOs};
pub use loader::{ExtensionsLoader, LoadReport};
pub use options::LoaderOptions;
pub use platform::{ExtensionModule, ModuleOpener, Platform, PlatformExtension, FACTORY_SYMBOL};
