//! Cross-reference checks for catalog files.
//!
//! The resolver tolerates dangling references by design, so none of these
//! checks run at load time; they exist for `catalog-lint` so authors editing
//! the static tables see every oddity at once. Findings accumulate instead of
//! short-circuiting, and each carries a severity: breakage that would render
//! wrong output is an error, tolerated-but-suspicious data is a warning.

use crate::catalog::{CatalogIndex, ToolSlug};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug, Serialize)]
/// One lint observation about the catalog tables.
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn warning(message: String) -> Self {
        Finding {
            severity: Severity::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Finding {
            severity: Severity::Error,
            message,
        }
    }
}

/// Lint an indexed catalog.
///
/// Assumes the structural checks in `CatalogIndex` already passed; everything
/// reported here is legal to resolve against.
pub fn lint_catalog(index: &CatalogIndex) -> Vec<Finding> {
    let catalog = index.catalog();
    let mut findings = Vec::new();

    for (slug, entry) in &catalog.tools {
        if entry.name.trim().is_empty() {
            findings.push(Finding::error(format!("tool '{slug}' has a blank name")));
        }
        if entry.path.trim().is_empty() {
            findings.push(Finding::error(format!("tool '{slug}' has a blank path")));
        }
    }

    for (slug, related) in &catalog.manual_related {
        if !catalog.tools.contains_key(slug) {
            findings.push(Finding::warning(format!(
                "manual mapping key '{slug}' has no tools entry"
            )));
        }
        let mut seen: BTreeSet<&ToolSlug> = BTreeSet::new();
        for target in related {
            if target == slug {
                findings.push(Finding::warning(format!(
                    "manual mapping for '{slug}' lists itself"
                )));
            }
            if !catalog.tools.contains_key(target) {
                findings.push(Finding::warning(format!(
                    "manual mapping for '{slug}' references unknown tool '{target}'"
                )));
            }
            if !seen.insert(target) {
                findings.push(Finding::warning(format!(
                    "manual mapping for '{slug}' lists '{target}' more than once"
                )));
            }
        }
    }

    let mut membership: BTreeMap<&ToolSlug, Vec<&str>> = BTreeMap::new();
    for group in &catalog.categories {
        for member in &group.members {
            if !catalog.tools.contains_key(member) {
                findings.push(Finding::warning(format!(
                    "category '{}' references unknown tool '{member}'",
                    group.id
                )));
            }
            membership.entry(member).or_default().push(group.id.as_str());
        }
    }
    for (slug, groups) in &membership {
        if groups.len() > 1 {
            findings.push(Finding::warning(format!(
                "tool '{slug}' appears in multiple categories: {}",
                groups.join(", ")
            )));
        }
    }
    for slug in catalog.tools.keys() {
        if !membership.contains_key(slug) {
            findings.push(Finding::warning(format!(
                "tool '{slug}' belongs to no category (category tier will never offer it)"
            )));
        }
    }

    findings
}

/// True when any finding is error-level.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings
        .iter()
        .any(|finding| finding.severity == Severity::Error)
}
