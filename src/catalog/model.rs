//! Deserializable representation of `schema/tools.json`.
//!
//! The types mirror the catalog schema so the resolver, renderers, and lint
//! helpers can reason about tool metadata without ad-hoc JSON handling. Use
//! `CatalogIndex` for validation and lookup; use these structs when the raw
//! catalog surface is required (lint reports, re-serialization).

use crate::catalog::identity::{CategoryId, ToolSlug};
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full tool catalog as stored on disk.
pub struct ToolCatalog {
    pub schema_version: String,
    pub tools: BTreeMap<ToolSlug, ToolEntry>,
    /// Hand-curated adjacency table; value order is priority order. Entries
    /// may reference slugs absent from `tools` and may be empty.
    #[serde(default)]
    pub manual_related: BTreeMap<ToolSlug, Vec<ToolSlug>>,
    /// Ordered fallback groups; the first group containing a slug wins.
    #[serde(default)]
    pub categories: Vec<CategoryGroup>,
}

#[derive(Clone, Debug, Deserialize)]
/// Display metadata for one tool: label and relative link target.
pub struct ToolEntry {
    pub name: String,
    pub path: String,
}

#[derive(Clone, Debug, Deserialize)]
/// One category in the fallback table; member order is priority order.
pub struct CategoryGroup {
    pub id: CategoryId,
    pub members: Vec<ToolSlug>,
}

/// Read and parse a tool catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<ToolCatalog> {
    let data = fs::read_to_string(path)?;
    let catalog: ToolCatalog = serde_json::from_str(&data)?;
    Ok(catalog)
}
