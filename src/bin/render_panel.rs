//! Renders the related-tools HTML fragment for a page slug.
//!
//! Prints the `<section>` markup to stdout, or nothing at all when the
//! resolver returns too few entries for the panel to show. Suppression is the
//! panel contract, not an error, so the exit status stays zero.

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;
use toolrack::{ToolSlug, Variant, load_catalog_index, render_related, render_related_with};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let index = load_catalog_index(args.catalog.as_deref())?;

    let rendered = match args.seed {
        Some(seed) => render_related_with(
            &index,
            &args.slug,
            args.variant,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => render_related(&index, &args.slug, args.variant),
    };

    if let Some(html) = rendered {
        print!("{html}");
    }
    Ok(())
}

struct CliArgs {
    slug: ToolSlug,
    variant: Variant,
    catalog: Option<PathBuf>,
    seed: Option<u64>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut slug: Option<String> = None;
        let mut variant = Variant::Default;
        let mut catalog: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--slug" => {
                    let value = next_value(&mut args, "--slug")?;
                    if slug.is_some() {
                        bail!("slug provided more than once");
                    }
                    slug = Some(value);
                }
                "--variant" => {
                    variant = Variant::parse(&next_value(&mut args, "--variant")?)?;
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
            variant,
            catalog,
            seed,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: render-panel SLUG [--variant sidebar|default] [--catalog PATH] [--seed N]\n\
Resolves related tools for the slug and prints the HTML panel fragment; prints nothing when the panel is suppressed.\n"
}
