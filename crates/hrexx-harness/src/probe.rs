//! `hrexx bind`: bind a runtime, report its symbol table, tear it down.
//!
//! Every step goes to the structured log. Failures are logged as one entry
//! per [`Report`] before being returned.

use hrexx_core::message::{MessageCode, Report};
use hrexx_core::registry::RuntimeEntry;
use hrexx_loader::{Binder, PlatformLoader};
use serde::Serialize;

use crate::error::HarnessError;
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSymbol {
    pub name: String,
    /// Address as a hex string; only meaningful inside this process.
    pub address: String,
}

/// What `hrexx bind` prints on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindSummary {
    pub package: String,
    pub library: String,
    pub lazy: bool,
    pub symbols: Vec<ResolvedSymbol>,
}

/// Bind `entry` through `binder`, snapshot the symbol table, then release.
pub fn probe<L: PlatformLoader + Clone>(
    binder: &Binder<L>,
    entry: &RuntimeEntry,
    log: &mut LogEmitter,
) -> Result<BindSummary, HarnessError> {
    log.emit_entry(
        LogEntry::new("", LogLevel::Info, "bind_start")
            .with_package(entry.package.clone())
            .with_library(entry.library.clone()),
    )?;

    let mut binding = match binder.bind(entry) {
        Ok(binding) => binding,
        Err(failure) => {
            for error in std::iter::once(&failure.error).chain(failure.cleanup.as_ref()) {
                let mut line = LogEntry::from_report("bind_failed", &error.report())
                    .with_library(entry.library.clone())
                    .with_outcome(Outcome::Fail);
                if let Some(symbol) = error.symbol() {
                    line = line.with_symbol(symbol);
                }
                log.emit_entry(line)?;
            }
            return Err(failure.into());
        }
    };

    let symbols = binding
        .symbols()
        .iter()
        .map(|(name, sym)| ResolvedSymbol {
            name: name.to_string(),
            address: format!("{:#x}", sym.addr()),
        })
        .collect();
    let summary = BindSummary {
        package: entry.package.clone(),
        library: entry.library.clone(),
        lazy: binder.flags().is_lazy(),
        symbols,
    };

    let bound = Report::new(MessageCode::Hhc17534, &entry.package, &entry.library);
    log.emit_entry(
        LogEntry::from_report("bind_complete", &bound)
            .with_outcome(Outcome::Pass)
            .with_details(serde_json::json!({ "symbols": summary.symbols.len() })),
    )?;

    if let Err(err) = binding.teardown() {
        log.emit_entry(
            LogEntry::from_report("release_failed", &err.report()).with_outcome(Outcome::Fail),
        )?;
        return Err(err.into());
    }
    let released = Report::new(MessageCode::Hhc17535, &entry.package, &entry.library);
    log.emit_entry(
        LogEntry::from_report("release_complete", &released).with_outcome(Outcome::Pass),
    )?;

    Ok(summary)
}
