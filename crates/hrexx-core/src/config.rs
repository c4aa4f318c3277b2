//! Runtime selection configuration.
//!
//! Read from the environment:
//! - `HREXX_PACKAGE`: runtime package (`Regina` or `ooRexx`, case-insensitive).
//! - `HREXX_LIBRARY`: library filename or path replacing the registry default.
//! - `HREXX_PATH`: script search directories, platform path-list syntax.
//! - `HREXX_EXTENSIONS`: script extensions, platform extension-list syntax.
//!
//! Unknown package names are kept verbatim so the caller can report them.

use crate::registry::{RuntimeEntry, RuntimePackage};
use crate::search::SearchConventions;
use crate::string::trim_str;

pub const ENV_PACKAGE: &str = "HREXX_PACKAGE";
pub const ENV_LIBRARY: &str = "HREXX_LIBRARY";
pub const ENV_PATH: &str = "HREXX_PATH";
pub const ENV_EXTENSIONS: &str = "HREXX_EXTENSIONS";

/// Package selection as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageChoice {
    Known(RuntimePackage),
    Unknown(String),
}

impl PackageChoice {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        RuntimePackage::from_str_loose(raw)
            .map_or_else(|| Self::Unknown(trim_str(raw).to_string()), Self::Known)
    }
}

/// Configured runtime selection and script search conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub package: Option<PackageChoice>,
    pub library: Option<String>,
    pub search: SearchConventions,
}

impl RuntimeConfig {
    /// Configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup. Blank values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| trim_str(&v).to_string())
                .filter(|v| !v.is_empty())
        };

        let paths = get(ENV_PATH);
        let extensions = get(ENV_EXTENSIONS);
        Self {
            package: get(ENV_PACKAGE).map(|v| PackageChoice::parse(&v)),
            library: get(ENV_LIBRARY),
            search: SearchConventions::from_lists(paths.as_deref(), extensions.as_deref()),
        }
    }

    /// Override the package with an explicit choice (e.g. a CLI flag).
    #[must_use]
    pub fn with_package(mut self, raw: &str) -> Self {
        self.package = Some(PackageChoice::parse(raw));
        self
    }

    /// Override the library. A blank value leaves the current setting.
    #[must_use]
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        let library = library.into();
        if !trim_str(&library).is_empty() {
            self.library = Some(library);
        }
        self
    }

    /// The registry entry this configuration selects, with any library
    /// override applied.
    pub fn entry(&self) -> Result<RuntimeEntry, ConfigError> {
        let package = match &self.package {
            None => return Err(ConfigError::NoPackage),
            Some(PackageChoice::Unknown(name)) => {
                return Err(ConfigError::UnknownPackage(name.clone()));
            }
            Some(PackageChoice::Known(package)) => *package,
        };
        let entry = package.entry();
        Ok(match &self.library {
            Some(library) => entry.with_library(library.clone()),
            None => entry,
        })
    }
}

/// Reasons a configuration cannot select a runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoPackage,
    UnknownPackage(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPackage => write!(f, "no runtime package selected (set {ENV_PACKAGE})"),
            Self::UnknownPackage(name) => write!(f, "unknown runtime package '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment() {
        let cfg = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(cfg, RuntimeConfig::default());
        assert_eq!(cfg.entry(), Err(ConfigError::NoPackage));
    }

    #[test]
    fn package_and_library_override() {
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[
            (ENV_PACKAGE, " oorexx "),
            (ENV_LIBRARY, "/opt/oorexx/lib/librexx.so.4"),
        ]));
        assert_eq!(cfg.package, Some(PackageChoice::Known(RuntimePackage::OoRexx)));
        let entry = cfg.entry().unwrap();
        assert_eq!(entry.package, "ooRexx");
        assert_eq!(entry.library, "/opt/oorexx/lib/librexx.so.4");
    }

    #[test]
    fn unknown_package_is_reported() {
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[(ENV_PACKAGE, "ARexx")]));
        assert_eq!(cfg.entry(), Err(ConfigError::UnknownPackage("ARexx".to_string())));
        assert_eq!(
            cfg.entry().unwrap_err().to_string(),
            "unknown runtime package 'ARexx'"
        );
    }

    #[test]
    fn blank_library_override_is_ignored() {
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[(ENV_LIBRARY, "/opt/libregina.so")]))
            .with_library("")
            .with_library(" \t");
        assert_eq!(cfg.library.as_deref(), Some("/opt/libregina.so"));

        let cfg = RuntimeConfig::default().with_package("regina").with_library("  ");
        assert_eq!(cfg.entry().unwrap().library, RuntimePackage::Regina.library());
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg =
            RuntimeConfig::from_lookup(lookup_from(&[(ENV_PACKAGE, "  "), (ENV_LIBRARY, "")]));
        assert!(cfg.package.is_none());
        assert!(cfg.library.is_none());
    }

    #[test]
    fn explicit_overrides_win() {
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[(ENV_PACKAGE, "ooRexx")]))
            .with_package("Regina")
            .with_library("libregina.so.3");
        let entry = cfg.entry().unwrap();
        assert_eq!(entry.package, "Regina");
        assert_eq!(entry.library, "libregina.so.3");
    }

    #[test]
    fn search_lists_from_environment() {
        let paths = format!("/usr/local/rexx{}/home/op/rexx", crate::search::PATH_DELIM);
        let cfg = RuntimeConfig::from_lookup(lookup_from(&[
            (ENV_PATH, paths.as_str()),
            (ENV_EXTENSIONS, ".rexx"),
        ]));
        assert_eq!(cfg.search.paths, ["/usr/local/rexx", "/home/op/rexx"]);
        assert_eq!(cfg.search.extensions, [".rexx"]);
    }
}
