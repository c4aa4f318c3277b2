//! Loader and binding errors.
//!
//! Every failure names the runtime package involved and carries the OS
//! loader's diagnostic unchanged. [`LoaderError::report`] maps a failure onto
//! the message catalogue for whatever sink the host uses.

use hrexx_core::message::{MessageCode, Report};
use thiserror::Error;

use crate::platform::OsDiagnostic;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("REXX({package}) unable to load library '{library}': {diagnostic}")]
    LibraryOpen {
        package: String,
        library: String,
        diagnostic: OsDiagnostic,
    },
    #[error("REXX({package}) unable to resolve symbol '{symbol}': {diagnostic}")]
    SymbolResolution {
        package: String,
        symbol: String,
        diagnostic: OsDiagnostic,
    },
    #[error("REXX({package}) unable to release library '{library}': {diagnostic}")]
    LibraryClose {
        package: String,
        library: String,
        diagnostic: OsDiagnostic,
    },
}

impl LoaderError {
    #[must_use]
    pub fn code(&self) -> MessageCode {
        match self {
            Self::LibraryOpen { .. } => MessageCode::Hhc17531,
            Self::LibraryClose { .. } => MessageCode::Hhc17532,
            Self::SymbolResolution { .. } => MessageCode::Hhc17533,
        }
    }

    #[must_use]
    pub fn package(&self) -> &str {
        match self {
            Self::LibraryOpen { package, .. }
            | Self::SymbolResolution { package, .. }
            | Self::LibraryClose { package, .. } => package,
        }
    }

    #[must_use]
    pub fn diagnostic(&self) -> &OsDiagnostic {
        match self {
            Self::LibraryOpen { diagnostic, .. }
            | Self::SymbolResolution { diagnostic, .. }
            | Self::LibraryClose { diagnostic, .. } => diagnostic,
        }
    }

    /// The unresolved symbol, for resolution failures.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::SymbolResolution { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    /// Entry for the error-reporting channel.
    #[must_use]
    pub fn report(&self) -> Report {
        let detail = match self {
            Self::LibraryOpen {
                library,
                diagnostic,
                ..
            }
            | Self::LibraryClose {
                library,
                diagnostic,
                ..
            } => format!("'{library}': {diagnostic}"),
            Self::SymbolResolution {
                symbol, diagnostic, ..
            } => format!("'{symbol}': {diagnostic}"),
        };
        Report::new(self.code(), self.package(), detail)
    }
}

/// A failed binding attempt.
///
/// `error` is the first failure. When that failure happened after the
/// library was opened, the handle was released before returning; if the
/// release itself failed, that is kept in `cleanup` without replacing the
/// original error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct BindFailure {
    #[source]
    pub error: LoaderError,
    pub cleanup: Option<LoaderError>,
}

impl BindFailure {
    #[must_use]
    pub fn new(error: LoaderError) -> Self {
        Self {
            error,
            cleanup: None,
        }
    }

    /// All reports for this attempt, primary failure first.
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        std::iter::once(&self.error)
            .chain(self.cleanup.as_ref())
            .map(LoaderError::report)
            .collect()
    }
}

impl From<LoaderError> for BindFailure {
    fn from(error: LoaderError) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_error() -> LoaderError {
        LoaderError::SymbolResolution {
            package: "Regina".to_string(),
            symbol: "RexxStart".to_string(),
            diagnostic: OsDiagnostic::new("undefined symbol: RexxStart"),
        }
    }

    #[test]
    fn display_names_package_and_symbol() {
        assert_eq!(
            resolve_error().to_string(),
            "REXX(Regina) unable to resolve symbol 'RexxStart': undefined symbol: RexxStart"
        );
    }

    #[test]
    fn codes_per_kind() {
        let open = LoaderError::LibraryOpen {
            package: "ooRexx".to_string(),
            library: "librexx.so".to_string(),
            diagnostic: OsDiagnostic::new("not found"),
        };
        assert_eq!(open.code(), MessageCode::Hhc17531);
        assert_eq!(resolve_error().code(), MessageCode::Hhc17533);
        assert_eq!(open.symbol(), None);
        assert_eq!(resolve_error().symbol(), Some("RexxStart"));
    }

    #[test]
    fn report_carries_detail() {
        let report = resolve_error().report();
        assert_eq!(report.package, "Regina");
        assert_eq!(report.detail, "'RexxStart': undefined symbol: RexxStart");
        assert!(report.render().starts_with("HHC17533E REXX(Regina)"));
    }

    #[test]
    fn bind_failure_reports_cleanup_after_primary() {
        let close = LoaderError::LibraryClose {
            package: "Regina".to_string(),
            library: "libregina.so".to_string(),
            diagnostic: OsDiagnostic::new("busy"),
        };
        let failure = BindFailure {
            error: resolve_error(),
            cleanup: Some(close),
        };
        let reports = failure.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].code, MessageCode::Hhc17533);
        assert_eq!(reports[1].code, MessageCode::Hhc17532);
        assert_eq!(failure.to_string(), resolve_error().to_string());
    }
}
