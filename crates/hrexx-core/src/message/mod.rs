//! Message catalogue for runtime binding diagnostics.
//!
//! Failures are described by a [`Report`]: a stable message code, a
//! severity, the package involved, and free-text detail (usually the OS
//! loader's own diagnostic). Rendering follows the host console convention
//! `HHCnnnnnS text`. Nothing here writes anywhere; callers decide whether and
//! how to log.

use std::fmt;

/// Message severity, rendered as the trailing letter of the message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Severe,
}

impl Severity {
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Info => 'I',
            Self::Warning => 'W',
            Self::Error => 'E',
            Self::Severe => 'S',
        }
    }
}

/// Stable message codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCode {
    /// Generic loader diagnostic.
    Hhc17530,
    /// Library could not be opened.
    Hhc17531,
    /// Library could not be released.
    Hhc17532,
    /// Symbol could not be resolved.
    Hhc17533,
    /// Runtime bound successfully.
    Hhc17534,
    /// Runtime released.
    Hhc17535,
}

impl MessageCode {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Hhc17530 => "HHC17530",
            Self::Hhc17531 => "HHC17531",
            Self::Hhc17532 => "HHC17532",
            Self::Hhc17533 => "HHC17533",
            Self::Hhc17534 => "HHC17534",
            Self::Hhc17535 => "HHC17535",
        }
    }

    /// Severity the catalogue assigns to this code.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Hhc17534 | Self::Hhc17535 => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Short description of what the message reports.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Hhc17530 => "loader error",
            Self::Hhc17531 => "unable to load library",
            Self::Hhc17532 => "unable to release library",
            Self::Hhc17533 => "unable to resolve symbol",
            Self::Hhc17534 => "runtime bound",
            Self::Hhc17535 => "runtime released",
        }
    }

    /// Parse a message id such as `HHC17533` (a severity suffix is ignored).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.get(..8).unwrap_or(id);
        [
            Self::Hhc17530,
            Self::Hhc17531,
            Self::Hhc17532,
            Self::Hhc17533,
            Self::Hhc17534,
            Self::Hhc17535,
        ]
        .into_iter()
        .find(|code| code.id().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One entry on the error-reporting channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub code: MessageCode,
    pub severity: Severity,
    pub package: String,
    pub detail: String,
}

impl Report {
    /// Report with the catalogue severity for `code`.
    #[must_use]
    pub fn new(code: MessageCode, package: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            package: package.into(),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Console rendering, e.g. `HHC17531E REXX(Regina) unable to load library: ...`.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} REXX({}) {}",
            self.code.id(),
            self.severity.letter(),
            self.package,
            self.code.summary()
        )?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}
