//! Loader configuration.

use crate::file::TargetOs;

/// Which extension files a loader picks up and how it reports failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    pub target_os: TargetOs,
    /// Load edit-time (`e` suffixed) extensions instead of run-time ones.
    pub edittime: bool,
    /// Do not report files lacking the factory symbol. Every other failure
    /// is still reported.
    pub forgiving: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            target_os: TargetOs::current(),
            edittime: false,
            forgiving: false,
        }
    }
}

impl LoaderOptions {
    pub fn with_target_os(mut self, target_os: TargetOs) -> Self {
        self.target_os = target_os;
        self
    }

    pub fn with_edittime(mut self, edittime: bool) -> Self {
        self.edittime = edittime;
        self
    }

    pub fn with_forgiving(mut self, forgiving: bool) -> Self {
        self.forgiving = forgiving;
        self
    }
}
