//! Tool catalog wiring.
//!
//! This module wraps the JSON catalog under `schema/tools.json` so the
//! resolver and renderers work from one validated snapshot with consistent
//! identifiers. Types here mirror the schema fields; callers use
//! `CatalogIndex` for lookups and the model structs when the raw tables are
//! required.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CatalogKey, CategoryId, ToolSlug};
pub use index::CatalogIndex;
pub use model::{CategoryGroup, ToolCatalog, ToolEntry};

pub use model::load_catalog_from_path;
