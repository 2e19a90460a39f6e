//! Validates a catalog file and reports cross-reference findings.
//!
//! Schema validation and structural checks run first (a catalog that fails
//! them is an error before lint starts); the lint pass then reports every
//! referential oddity at once as a JSON report. Warning-level findings (the
//! ones the resolver tolerates at runtime) leave the exit status at zero;
//! error-level findings fail the run.

use anyhow::{Result, bail};
use serde_json::json;
use std::env;
use std::path::PathBuf;
use toolrack::{Severity, has_errors, lint_catalog, load_catalog_index};

fn main() {
    match run() {
        Ok(clean) => {
            if !clean {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let args = CliArgs::parse()?;
    let index = load_catalog_index(args.catalog.as_deref())?;
    let findings = lint_catalog(&index);

    let warnings = findings
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .count();
    let errors = findings.len() - warnings;

    let report = json!({
        "catalog": args
            .catalog
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        "schema_version": index.key(),
        "tools": index.slugs().count(),
        "errors": errors,
        "warnings": warnings,
        "findings": findings,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(!has_errors(&findings))
}

struct CliArgs {
    catalog: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut catalog: Option<PathBuf> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                }
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }
        Ok(CliArgs { catalog })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: catalog-lint [--catalog PATH]\n\
Validates a tool catalog (JSON Schema + structural checks), then reports dangling references, self-references, duplicate category membership, and uncategorized tools as a JSON report. Exits nonzero on error-level findings.\n"
}
