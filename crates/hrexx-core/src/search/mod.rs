//! Script search conventions: path-list and extension-list delimiters,
//! default extensions, and the directory/name/extension join format.
//!
//! Candidate generation is pure; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

#[cfg(windows)]
mod os {
    pub const PATH_DELIM: char = ';';
    pub const EXT_DELIM: char = ';';
    pub const DIR_SEPARATOR: char = '\\';
}

#[cfg(not(windows))]
mod os {
    pub const PATH_DELIM: char = ':';
    pub const EXT_DELIM: char = ':';
    pub const DIR_SEPARATOR: char = '/';
}

pub use os::{DIR_SEPARATOR, EXT_DELIM, PATH_DELIM};

/// Extensions probed after the bare script name, in order.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".REXX", ".rexx", ".REX", ".rex", ".CMD", ".cmd", ".RX", ".rx",
];

/// Joins `dir`, `name` and `ext` as `dir/nameext` (`dir\nameext` on Windows).
#[must_use]
pub fn join(dir: &str, name: &str, ext: &str) -> String {
    if dir.is_empty() {
        return format!("{name}{ext}");
    }
    let dir = dir.strip_suffix(DIR_SEPARATOR).unwrap_or(dir);
    format!("{dir}{DIR_SEPARATOR}{name}{ext}")
}

/// Split a delimiter-separated list, dropping empty and blank items.
#[must_use]
pub fn split_list(list: &str, delim: char) -> Vec<String> {
    list.split(delim)
        .map(crate::string::trim_str)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where and how to look for a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConventions {
    pub paths: Vec<String>,
    pub extensions: Vec<String>,
}

impl Default for SearchConventions {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl SearchConventions {
    /// Conventions from a path list and an extension list in platform syntax.
    ///
    /// An absent extension list keeps [`DEFAULT_EXTENSIONS`].
    #[must_use]
    pub fn from_lists(paths: Option<&str>, extensions: Option<&str>) -> Self {
        let mut conv = Self::default();
        if let Some(paths) = paths {
            conv.paths = split_list(paths, PATH_DELIM);
        }
        if let Some(exts) = extensions {
            conv.extensions = split_list(exts, EXT_DELIM);
        }
        conv
    }

    /// Files to probe for `script`, in priority order.
    ///
    /// The name as given comes first, followed by the name with each
    /// extension. A bare name (no directory component) is then tried in each
    /// search directory the same way. A name that already carries one of the
    /// known extensions is not extended again.
    #[must_use]
    pub fn candidates(&self, script: &str) -> Vec<PathBuf> {
        let script = crate::string::trim_str(script);
        if script.is_empty() {
            return Vec::new();
        }

        let extensions: Vec<&str> = if self.has_extension(script) {
            vec![""]
        } else {
            std::iter::once("")
                .chain(self.extensions.iter().map(String::as_str))
                .collect()
        };

        let mut out: Vec<PathBuf> = extensions
            .iter()
            .map(|ext| PathBuf::from(join("", script, ext)))
            .collect();

        if is_bare_name(script) {
            for dir in &self.paths {
                out.extend(
                    extensions
                        .iter()
                        .map(|ext| PathBuf::from(join(dir, script, ext))),
                );
            }
        }
        out
    }

    fn has_extension(&self, script: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| !ext.is_empty() && script.ends_with(ext.as_str()))
    }
}

fn is_bare_name(script: &str) -> bool {
    Path::new(script).components().count() == 1 && !script.contains(DIR_SEPARATOR)
}
