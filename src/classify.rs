//! Decide whether a file is handled as raw bytes or as text.
//!
//! The decision is made purely from the file extension, against two small
//! allow-lists. Anything else falls back to a default, which is binary unless
//! the caller says otherwise. A forced mode always wins.
//!
//! ```
//! use seabuild::classify::{is_binary, mode_for, Mode};
//!
//! assert!(is_binary("img/logo.png", None));
//! assert!(!is_binary("src/Viewer.js", None));
//! assert!(is_binary("README", None));
//! assert_eq!(mode_for("src/Viewer.js", Some(Mode::Binary)), Mode::Binary);
//! ```

use std::path::Path;

const BINARY_TYPES: [&str; 8] = ["cur", "dll", "jpeg", "jpg", "ico", "pdb", "png", "xap"];
const TEXT_TYPES: [&str; 8] = ["asp", "aspx", "cs", "css", "js", "htm", "html", "txt"];

/// How file contents are read and written.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Binary,
    Text,
}

impl From<bool> for Mode {
    fn from(binary: bool) -> Self {
        match binary {
            true => Mode::Binary,
            false => Mode::Text,
        }
    }
}

/// Extension-based classifier with a configurable fallback.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Classifier {
    pub default: Mode,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            default: Mode::Binary,
        }
    }
}

impl Classifier {
    pub fn new(default: Mode) -> Self {
        Self { default: default }
    }

    pub fn classify(&self, path: impl AsRef<Path>, forced: Option<Mode>) -> Mode {
        if let Some(mode) = forced {
            return mode;
        }
        match extension(path.as_ref()) {
            Some(ext) if BINARY_TYPES.contains(&ext.as_str()) => Mode::Binary,
            Some(ext) if TEXT_TYPES.contains(&ext.as_str()) => Mode::Text,
            _ => self.default,
        }
    }
}

/// Everything after the last '.' of the whole path, if there is one.
fn extension(path: &Path) -> Option<String> {
    let s = path.to_string_lossy();
    s.rfind('.').map(|dot| s[dot + 1..].to_owned())
}

/// Classify with the binary fallback.
pub fn mode_for(path: impl AsRef<Path>, forced: Option<Mode>) -> Mode {
    Classifier::default().classify(path, forced)
}

pub fn is_binary(path: impl AsRef<Path>, forced: Option<bool>) -> bool {
    mode_for(path, forced.map(Mode::from)) == Mode::Binary
}
