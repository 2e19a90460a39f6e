//! Indexed view of a tool catalog instance.
//!
//! The index enforces the expected catalog schema version, runs structural
//! checks, and precomputes the slug-to-category lookup the resolver needs.
//! It is intentionally strict about duplicates and unknown schema versions so
//! callers cannot silently consume mismatched catalogs. Cross-references that
//! dangle (a mapping naming a slug with no `tools` entry) are legal here; the
//! resolver substitutes defaults and `catalog-lint` reports them.

use crate::catalog::identity::{CatalogKey, CategoryId, ToolSlug};
use crate::catalog::model::{ToolCatalog, ToolEntry, load_catalog_from_path};
use anyhow::{Context, Result, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

// The site ships a single catalog contract; reject unexpected versions rather
// than risk resolving against tables with different semantics.
const DEFAULT_SCHEMA_VERSION: &str = "tool_catalog_v1";

/// Canonical catalog data compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../schema/tools.json");
/// Canonical JSON Schema for catalog files, compiled into the binary.
const CATALOG_SCHEMA: &str = include_str!("../../schema/tool_catalog.schema.json");

#[derive(Debug)]
/// Tool catalog plus derived lookup tables.
///
/// All accessors are read-only and return `None` for absent keys; the catalog
/// never changes after construction.
pub struct CatalogIndex {
    key: CatalogKey,
    catalog: ToolCatalog,
    category_of: BTreeMap<ToolSlug, CategoryId>,
}

impl CatalogIndex {
    /// Load and validate a catalog from disk.
    ///
    /// Validates the file against the catalog JSON Schema, checks the schema
    /// version against the allowed set, and runs the structural checks in
    /// [`CatalogIndex::from_catalog`].
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;
        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_catalog(catalog)
    }

    /// Build the index for the catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let value: Value =
            serde_json::from_str(BUILTIN_CATALOG).context("parsing built-in catalog")?;
        validate_value_against_schema(&value, "built-in catalog")?;
        let catalog = serde_json::from_value(value).context("decoding built-in catalog")?;
        Self::from_catalog(catalog)
    }

    /// Index an already-parsed catalog after structural validation.
    ///
    /// Enforces the schema-version allow-list, non-empty identifiers, and
    /// unique category ids. Builds the first-match-wins slug→category map:
    /// when a slug appears in several groups only the earliest group in file
    /// order counts, matching the resolver's fallback contract.
    pub fn from_catalog(catalog: ToolCatalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        if catalog.tools.is_empty() {
            bail!("catalog defines no tools");
        }
        for slug in catalog.tools.keys() {
            if slug.0.trim().is_empty() {
                bail!("catalog contains a tool with an empty slug");
            }
        }
        for slug in catalog.manual_related.keys() {
            if slug.0.trim().is_empty() {
                bail!("manual_related contains an empty slug key");
            }
        }

        let mut seen_categories: BTreeSet<CategoryId> = BTreeSet::new();
        let mut category_of: BTreeMap<ToolSlug, CategoryId> = BTreeMap::new();
        for group in &catalog.categories {
            if group.id.0.trim().is_empty() {
                bail!("categories must not contain empty ids");
            }
            if !seen_categories.insert(group.id.clone()) {
                bail!("duplicate category id {}", group.id);
            }
            for member in &group.members {
                if member.0.trim().is_empty() {
                    bail!("category {} contains an empty member slug", group.id);
                }
                category_of
                    .entry(member.clone())
                    .or_insert_with(|| group.id.clone());
            }
        }

        Ok(Self {
            key: CatalogKey(catalog.schema_version.clone()),
            catalog,
            category_of,
        })
    }

    /// The schema version key declared by the loaded catalog.
    pub fn key(&self) -> &CatalogKey {
        &self.key
    }

    /// Display record for a slug, if the catalog has one.
    pub fn info(&self, slug: &ToolSlug) -> Option<&ToolEntry> {
        self.catalog.tools.get(slug)
    }

    /// Hand-curated related slugs for a tool, in priority order.
    ///
    /// `Some` even when the sequence is empty: the presence of a manual entry
    /// is itself significant to the resolver's tier order.
    pub fn manual_related(&self, slug: &ToolSlug) -> Option<&[ToolSlug]> {
        self.catalog
            .manual_related
            .get(slug)
            .map(|slugs| slugs.as_slice())
    }

    /// The first category (in table order) whose members contain `slug`.
    pub fn category_of(&self, slug: &ToolSlug) -> Option<&CategoryId> {
        self.category_of.get(slug)
    }

    /// Member slugs of a category, in table order.
    pub fn members_of(&self, category: &CategoryId) -> Option<&[ToolSlug]> {
        self.catalog
            .categories
            .iter()
            .find(|group| &group.id == category)
            .map(|group| group.members.as_slice())
    }

    /// Iterates every known tool slug in stable order.
    pub fn slugs(&self) -> impl Iterator<Item = &ToolSlug> {
        self.catalog.tools.keys()
    }

    /// Access the underlying catalog (raw tables, for lint and rendering).
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([canonical_schema_version()])
}

fn canonical_schema_version() -> String {
    serde_json::from_str::<Value>(CATALOG_SCHEMA)
        .ok()
        .and_then(|schema| {
            schema
                .pointer("/properties/schema_version/const")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string())
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let data = fs::read_to_string(catalog_path)
        .with_context(|| format!("reading catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;
    validate_value_against_schema(&catalog_value, &catalog_path.display().to_string())
}

/// Validate a parsed catalog document against the canonical catalog schema
/// compiled into the binary. Every catalog source goes through this, the
/// built-in copy included.
pub(crate) fn validate_value_against_schema(catalog_value: &Value, label: &str) -> Result<()> {
    let schema = compiled_catalog_schema()?;
    if let Err(errors) = schema.validate(catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("tool catalog {label} failed schema validation:\n{details}");
    }
    Ok(())
}

fn compiled_catalog_schema() -> Result<&'static JSONSchema> {
    use std::sync::OnceLock;
    static COMPILED: OnceLock<JSONSchema> = OnceLock::new();
    if let Some(schema) = COMPILED.get() {
        return Ok(schema);
    }
    let schema_value: Value =
        serde_json::from_str(CATALOG_SCHEMA).context("parsing catalog schema")?;
    // The jsonschema compiler wants the document to outlive the validator;
    // the canonical schema lives for the whole process anyway.
    let schema_static: &'static Value = Box::leak(Box::new(schema_value));
    let compiled = JSONSchema::compile(schema_static)
        .map_err(|err| anyhow::anyhow!("compiling catalog schema: {err}"))?;
    Ok(COMPILED.get_or_init(|| compiled))
}
