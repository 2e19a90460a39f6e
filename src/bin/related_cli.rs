//! Resolves related tools for a page slug and prints them to stdout.
//!
//! The default JSON output is the serialized resolver result, one array of
//! `{slug, name, path}` records in priority order. The random fallback tier
//! draws from process entropy unless `--seed` pins it, which makes output
//! reproducible for scripting and tests.

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;
use toolrack::{RelatedToolsResolver, ToolSlug, load_catalog_index};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let index = load_catalog_index(args.catalog.as_deref())?;
    let resolver = RelatedToolsResolver::new(&index);

    let resolved = match args.seed {
        Some(seed) => resolver.resolve_with(&args.slug, &mut StdRng::seed_from_u64(seed)),
        None => resolver.resolve(&args.slug),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&resolved)?),
        OutputFormat::Text => {
            for tool in &resolved {
                println!("{}\t{}\t{}", tool.slug, tool.name, tool.path);
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => bail!("unknown format '{other}' (expected json|text)"),
        }
    }
}

struct CliArgs {
    slug: ToolSlug,
    catalog: Option<PathBuf>,
    seed: Option<u64>,
    format: OutputFormat,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut slug: Option<String> = None;
        let mut catalog: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut format = OutputFormat::Json;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--slug" => {
                    let value = next_value(&mut args, "--slug")?;
                    if slug.is_some() {
                        bail!("slug provided more than once");
                    }
                    slug = Some(value);
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                }
                "--seed" => {
                    let raw = next_value(&mut args, "--seed")?;
                    seed = Some(raw.parse().map_err(|_| {
                        anyhow::anyhow!("--seed expects an unsigned integer, got {raw}")
                    })?);
                }
                "--format" => {
                    format = OutputFormat::from_str(&next_value(&mut args, "--format")?)?;
                }
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other if !other.starts_with('-') => {
                    if slug.is_some() {
                        bail!("slug provided more than once");
                    }
                    slug = Some(other.to_string());
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        let Some(slug) = slug else {
            bail!("missing slug (pass it as the first argument or via --slug)");
        };
        Ok(CliArgs {
            slug: ToolSlug(slug),
            catalog,
            seed,
            format,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: related SLUG [--catalog PATH] [--seed N] [--format json|text]\n\
Resolves related tools for the given slug via the manual/category/random fallback tiers and prints them in priority order.\n"
}
