//! Related-tools resolution over a catalog snapshot.
//!
//! Resolution runs a strict three-tier fallback: the hand-curated adjacency
//! table first, then the category table, then a random sample of the whole
//! catalog. The first applicable tier wins outright; tiers are never merged.
//! A manual entry short-circuits the category tier even when filtering leaves
//! it empty. The random tier is non-deterministic through the default entropy
//! source; callers that need reproducible output inject their own `Rng`.

use crate::catalog::{CatalogIndex, ToolSlug};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Cap for the curated tiers (manual mapping and category fallback).
pub const CURATED_LIMIT: usize = 4;
/// Sample size for the last-resort random tier.
pub const RANDOM_SAMPLE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One resolved related tool, ready for rendering or JSON emission.
///
/// `name` and `path` are always non-empty: slugs without a catalog display
/// record fall back to the raw slug and a derived `./{slug}/` link.
pub struct RelatedTool {
    pub slug: ToolSlug,
    pub name: String,
    pub path: String,
}

/// Resolves related tools for a page against one immutable catalog.
///
/// Pure read of the index apart from the entropy consumed by the random tier;
/// results are recomputed on every call and never cached.
pub struct RelatedToolsResolver<'a> {
    index: &'a CatalogIndex,
}

impl<'a> RelatedToolsResolver<'a> {
    pub fn new(index: &'a CatalogIndex) -> Self {
        Self { index }
    }

    /// Resolve with the process entropy source backing the random tier.
    pub fn resolve(&self, current: &ToolSlug) -> Vec<RelatedTool> {
        self.resolve_with(current, &mut rand::rng())
    }

    /// Resolve with an explicit entropy source.
    ///
    /// Tier order is observable: a present manual entry always answers, even
    /// when removing `current` empties it; the category tier only runs when no
    /// manual entry exists at all; unknown slugs fall through to the random
    /// sample. No tier can fail.
    pub fn resolve_with<R: Rng + ?Sized>(
        &self,
        current: &ToolSlug,
        rng: &mut R,
    ) -> Vec<RelatedTool> {
        if let Some(manual) = self.index.manual_related(current) {
            return self.curated(manual, current);
        }

        if let Some(category) = self.index.category_of(current) {
            let members = self.index.members_of(category).unwrap_or(&[]);
            return self.curated(members, current);
        }

        let mut pool: Vec<&ToolSlug> = self.index.slugs().filter(|slug| *slug != current).collect();
        pool.shuffle(rng);
        pool.into_iter()
            .take(RANDOM_SAMPLE)
            .map(|slug| self.describe(slug))
            .collect()
    }

    fn curated(&self, slugs: &[ToolSlug], current: &ToolSlug) -> Vec<RelatedTool> {
        slugs
            .iter()
            .filter(|slug| *slug != current)
            .take(CURATED_LIMIT)
            .map(|slug| self.describe(slug))
            .collect()
    }

    /// Display info for a referenced slug, defensive against dangling
    /// references: the catalog tables are not guaranteed to agree.
    fn describe(&self, slug: &ToolSlug) -> RelatedTool {
        match self.index.info(slug) {
            Some(entry) => RelatedTool {
                slug: slug.clone(),
                name: entry.name.clone(),
                path: entry.path.clone(),
            },
            None => RelatedTool {
                slug: slug.clone(),
                name: slug.0.clone(),
                path: format!("./{slug}/"),
            },
        }
    }
}
