//! JSON reformatter for the formatter page workflow.
//!
//! Reads JSON from a file or stdin, validates it, and prints it pretty-printed
//! (two-space indentation) or compacted. Parse failures report the underlying
//! error, including the line/column position.

use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use toolrack::{JsonStyle, reformat};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let input = args.source.read()?;
    println!("{}", reformat(&input, args.style)?);
    Ok(())
}

enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => {
                if !path.is_file() {
                    bail!("input file not found: {}", path.display());
                }
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
            }
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                Ok(buf)
            }
        }
    }
}

struct CliArgs {
    source: InputSource,
    style: JsonStyle,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut source: Option<InputSource> = None;
        let mut style = JsonStyle::Pretty;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => {
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::File(PathBuf::from(next_value(
                        &mut args, "--file",
                    )?)));
                }
                "--stdin" => {
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::Stdin);
                }
                "--compact" => {
                    style = JsonStyle::Compact;
                }
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            source: source.unwrap_or(InputSource::Stdin),
            style,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: json-fmt [--file PATH|--stdin] [--compact]\n\
Reads JSON, validates it, and prints it pretty-printed (default) or compacted.\n"
}
