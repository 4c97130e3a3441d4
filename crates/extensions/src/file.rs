//! Extension file naming.
//!
//! Extension files end in `.xgd` followed by one letter for the target OS
//! (`w` Windows, `l` Linux, `m` macOS) and an optional `e` marking an
//! edit-time extension: `foo.xgdl`, `foo.xgdwe`, ...

use std::fmt;
use std::path::{Path, PathBuf};

const SUFFIX_PREFIX: &str = "xgd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    Windows,
    Linux,
    MacOs,
}

impl TargetOs {
    /// The OS this crate is compiled for. Other unix-likes load Linux
    /// extensions.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_os = "macos") {
            TargetOs::MacOs
        } else {
            TargetOs::Linux
        }
    }

    fn letter(self) -> char {
        match self {
            TargetOs::Windows => 'w',
            TargetOs::Linux => 'l',
            TargetOs::MacOs => 'm',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'w' => Some(TargetOs::Windows),
            'l' => Some(TargetOs::Linux),
            'm' => Some(TargetOs::MacOs),
            _ => None,
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::MacOs => "macos",
        })
    }
}

/// File suffix, without the dot, used by extensions for `os`.
pub fn extension_suffix(os: TargetOs, edittime: bool) -> String {
    let mut suffix = String::from(SUFFIX_PREFIX);
    suffix.push(os.letter());
    if edittime {
        suffix.push('e');
    }
    suffix
}

/// A file recognised as an extension by its suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFile {
    path: PathBuf,
    target_os: TargetOs,
    edittime: bool,
}

impl ExtensionFile {
    /// Classify `path`, or `None` if its suffix is not an extension suffix.
    pub fn parse(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let suffix = path.extension()?.to_str()?;
        let rest = suffix.strip_prefix(SUFFIX_PREFIX)?;
        let mut chars = rest.chars();
        let target_os = TargetOs::from_letter(chars.next()?)?;
        let edittime = match chars.next() {
            None => false,
            Some('e') => true,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            target_os,
            edittime,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn target_os(&self) -> TargetOs {
        self.target_os
    }

    pub fn is_edittime(&self) -> bool {
        self.edittime
    }

    pub fn matches(&self, os: TargetOs, edittime: bool) -> bool {
        self.target_os == os && self.edittime == edittime
    }
}
