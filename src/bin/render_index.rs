//! Renders the tool index landing page as a complete HTML document.

use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;
use toolrack::{load_catalog_index, render_index_page};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let index = load_catalog_index(args.catalog.as_deref())?;
    print!("{}", render_index_page(&index));
    Ok(())
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
    "Usage: render-index [--catalog PATH]\n\
Prints the tool index page (every catalog tool as a linked card) as an HTML document.\n"
}
