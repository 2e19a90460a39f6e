//! Shared library for the Pokoro web-tools site helpers.
//!
//! The crate exposes the static tool catalog, the related-tools resolver, and
//! the HTML renderers used by the helper binaries. Public functions here form
//! the contract the binaries depend on: catalog loading with schema
//! validation, tiered related-tools resolution, panel/index rendering, JSON
//! reformatting, and the catalog lint checks.
//!
//! The catalog is seeded once at startup — from `schema/tools.json` compiled
//! into the binary, or from a file named on the CLI or via `TOOLRACK_CATALOG`
//! — and never changes during execution. Resolution is a pure read of that
//! snapshot except for the entropy consumed by the random fallback tier.

use anyhow::{Context, Result};
use std::env;
use std::path::Path;

pub mod catalog;
pub mod jsonfmt;
pub mod lint;
pub mod render;
pub mod resolver;

pub use catalog::{
    CatalogIndex, CatalogKey, CategoryGroup, CategoryId, ToolCatalog, ToolEntry, ToolSlug,
    load_catalog_from_path,
};
pub use jsonfmt::{JsonStyle, reformat};
pub use lint::{Finding, Severity, has_errors, lint_catalog};
pub use render::{Variant, render_index_page, render_panel, render_related, render_related_with};
pub use resolver::{CURATED_LIMIT, RANDOM_SAMPLE, RelatedTool, RelatedToolsResolver};

/// Environment override for the catalog file consumed by the binaries.
pub const CATALOG_ENV: &str = "TOOLRACK_CATALOG";

/// Load the catalog index the binaries should work from.
///
/// Search order: an explicit `--catalog` path, then `TOOLRACK_CATALOG`, then
/// the copy compiled into the binary. Explicit sources are validated like any
/// other catalog file; a bad path is an error, not a silent fallback.
pub fn load_catalog_index(explicit: Option<&Path>) -> Result<CatalogIndex> {
    if let Some(path) = explicit {
        return CatalogIndex::load(path)
            .with_context(|| format!("loading catalog {}", path.display()));
    }

    if let Ok(env_path) = env::var(CATALOG_ENV) {
        let trimmed = env_path.trim();
        if !trimmed.is_empty() {
            return CatalogIndex::load(Path::new(trimmed))
                .with_context(|| format!("loading catalog from {CATALOG_ENV}={trimmed}"));
        }
    }

    CatalogIndex::builtin()
}
