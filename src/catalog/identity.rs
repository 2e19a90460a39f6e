use serde::{Deserialize, Serialize};
use std::fmt;

/// Versioned key for a tool catalog snapshot (e.g., `tool_catalog_v1`).
///
/// Carried by catalog files so consumers can reject snapshots written for a
/// different resolver contract.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Unique short identifier for a tool.
///
/// Doubles as the lookup key in every catalog table and as the URL path
/// fragment used when a tool has no explicit display record.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolSlug(pub String);

/// Name of a category group in the fallback table.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl ToolSlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
