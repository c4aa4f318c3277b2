//! Serializable view of the runtime registry for `hrexx registry`.

use hrexx_core::registry::{self, RuntimeEntry};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryRow {
    pub package: String,
    pub library: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_library: Option<String>,
    pub symbols: Vec<String>,
}

impl From<&RuntimeEntry> for RegistryRow {
    fn from(entry: &RuntimeEntry) -> Self {
        Self {
            package: entry.package.clone(),
            library: entry.library.clone(),
            api_library: entry.api_library.clone(),
            symbols: entry.symbols.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Rows for every built-in registry entry on this OS.
#[must_use]
pub fn registry_rows() -> Vec<RegistryRow> {
    registry::entries().iter().map(RegistryRow::from).collect()
}
