//! Known REXX runtime packages and the symbols a binding must resolve.
//!
//! Library filenames are selected for the target OS at build time. Every
//! package exports the same SAA REXX API, so the required symbol list is
//! shared.

use std::fmt;

/// Entry point that runs a REXX program.
pub const REXX_START: &str = "RexxStart";
/// Registers a subcommand handler environment.
pub const REXX_REGISTER_SUBCOM: &str = "RexxRegisterSubcomExe";
pub const REXX_DEREGISTER_SUBCOM: &str = "RexxDeregisterSubcom";
/// Registers a system exit handler.
pub const REXX_REGISTER_EXIT: &str = "RexxRegisterExitExe";
pub const REXX_DEREGISTER_EXIT: &str = "RexxDeregisterExit";
pub const REXX_ALLOCATE_MEMORY: &str = "RexxAllocateMemory";
pub const REXX_FREE_MEMORY: &str = "RexxFreeMemory";
/// Shared variable pool interface.
pub const REXX_VARIABLE_POOL: &str = "RexxVariablePool";

/// Symbols every runtime binding resolves, in resolution order.
pub const REQUIRED_SYMBOLS: &[&str] = &[
    REXX_START,
    REXX_REGISTER_SUBCOM,
    REXX_DEREGISTER_SUBCOM,
    REXX_REGISTER_EXIT,
    REXX_DEREGISTER_EXIT,
    REXX_ALLOCATE_MEMORY,
    REXX_FREE_MEMORY,
    REXX_VARIABLE_POOL,
];

/// Subcommand environment name the host registers (`ADDRESS HERCULES`).
pub const HOST_SUBCOM_ENVIRONMENT: &str = "HERCULES";
/// Name of the host's SAY/PULL I/O exit.
pub const HOST_IO_EXIT: &str = "HERCSIOE";

pub const REGINA_PACKAGE: &str = "Regina";
pub const OOREXX_PACKAGE: &str = "ooRexx";

#[cfg(windows)]
mod libnames {
    pub const REGINA: &str = "regina.dll";
    pub const OOREXX: &str = "rexx.dll";
    pub const OOREXX_API: &str = "rexxapi.dll";
}

#[cfg(target_os = "macos")]
mod libnames {
    pub const REGINA: &str = "libregina.dylib";
    pub const OOREXX: &str = "librexx.dylib";
    pub const OOREXX_API: &str = "librexxapi.dylib";
}

#[cfg(not(any(windows, target_os = "macos")))]
mod libnames {
    pub const REGINA: &str = "libregina.so";
    pub const OOREXX: &str = "librexx.so";
    pub const OOREXX_API: &str = "librexxapi.so";
}

/// One of the interchangeable runtime families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimePackage {
    Regina,
    OoRexx,
}

impl RuntimePackage {
    pub const ALL: [Self; 2] = [Self::Regina, Self::OoRexx];

    /// Parse a package identifier (case-insensitive, surrounding blanks ignored).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match crate::string::trim_str(s).to_ascii_lowercase().as_str() {
            "regina" => Some(Self::Regina),
            "oorexx" | "oorexx4" | "rexx" => Some(Self::OoRexx),
            _ => None,
        }
    }

    /// Canonical package identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Regina => REGINA_PACKAGE,
            Self::OoRexx => OOREXX_PACKAGE,
        }
    }

    /// Default shared-library filename on this OS.
    #[must_use]
    pub const fn library(self) -> &'static str {
        match self {
            Self::Regina => libnames::REGINA,
            Self::OoRexx => libnames::OOREXX,
        }
    }

    /// Companion API library, for packages that split the API across two
    /// shared objects.
    #[must_use]
    pub const fn api_library(self) -> Option<&'static str> {
        match self {
            Self::Regina => None,
            Self::OoRexx => Some(libnames::OOREXX_API),
        }
    }

    /// Registry entry for this package with its default library.
    #[must_use]
    pub fn entry(self) -> RuntimeEntry {
        RuntimeEntry {
            package: self.name().to_string(),
            library: self.library().to_string(),
            api_library: self.api_library().map(str::to_string),
            symbols: REQUIRED_SYMBOLS,
        }
    }
}

impl fmt::Display for RuntimePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a binding needs to know about one runtime: where it lives and which
/// symbols it must export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEntry {
    pub package: String,
    /// Filename or path handed unchanged to the OS loader.
    pub library: String,
    pub api_library: Option<String>,
    pub symbols: &'static [&'static str],
}

impl RuntimeEntry {
    /// Entry for a runtime outside the built-in table.
    #[must_use]
    pub fn new(
        package: impl Into<String>,
        library: impl Into<String>,
        symbols: &'static [&'static str],
    ) -> Self {
        Self {
            package: package.into(),
            library: library.into(),
            api_library: None,
            symbols,
        }
    }

    /// Replace the library filename, e.g. with an absolute path from configuration.
    #[must_use]
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }
}

/// All built-in entries for this OS.
#[must_use]
pub fn entries() -> Vec<RuntimeEntry> {
    RuntimePackage::ALL.iter().map(|p| p.entry()).collect()
}

/// Look up a built-in entry by package identifier.
#[must_use]
pub fn lookup(package: &str) -> Option<RuntimeEntry> {
    RuntimePackage::from_str_loose(package).map(RuntimePackage::entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_packages() {
        assert_eq!(RuntimePackage::from_str_loose("Regina"), Some(RuntimePackage::Regina));
        assert_eq!(RuntimePackage::from_str_loose(" REGINA "), Some(RuntimePackage::Regina));
        assert_eq!(RuntimePackage::from_str_loose("ooRexx"), Some(RuntimePackage::OoRexx));
        assert_eq!(RuntimePackage::from_str_loose("OOREXX"), Some(RuntimePackage::OoRexx));
        assert_eq!(RuntimePackage::from_str_loose("brexx"), None);
        assert_eq!(RuntimePackage::from_str_loose(""), None);
    }

    #[test]
    fn required_symbols_are_complete_and_ordered() {
        assert_eq!(REQUIRED_SYMBOLS.len(), 8);
        assert_eq!(REQUIRED_SYMBOLS[0], REXX_START);
        assert_eq!(REQUIRED_SYMBOLS[7], REXX_VARIABLE_POOL);
    }

    #[test]
    fn entries_cover_both_packages() {
        let all = entries();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].package, "Regina");
        assert_eq!(all[1].package, "ooRexx");
        assert!(all[0].api_library.is_none());
        assert!(all[1].api_library.is_some());
        assert!(all.iter().all(|e| e.symbols == REQUIRED_SYMBOLS));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_library_names() {
        assert_eq!(RuntimePackage::Regina.library(), "libregina.so");
        assert_eq!(RuntimePackage::OoRexx.library(), "librexx.so");
        assert_eq!(RuntimePackage::OoRexx.api_library(), Some("librexxapi.so"));
    }

    #[test]
    fn lookup_and_override() {
        let entry = lookup("regina").unwrap().with_library("/opt/regina/lib/libregina.so");
        assert_eq!(entry.package, "Regina");
        assert_eq!(entry.library, "/opt/regina/lib/libregina.so");
        assert!(lookup("perl").is_none());
    }

    #[test]
    fn custom_entry() {
        let entry = RuntimeEntry::new("A", "liba.so", &["a_start"]);
        assert_eq!(entry.symbols, &["a_start"]);
        assert!(entry.api_library.is_none());
    }
}
