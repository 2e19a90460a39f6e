//! JSON reformatting for the formatter page.
//!
//! Parses raw text with serde_json and re-emits it pretty-printed (two-space
//! indentation) or compacted. Parse failures carry the parser's own message,
//! which includes the line/column position users need to locate the problem.

use anyhow::{Context, Result, bail};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonStyle {
    Pretty,
    Compact,
}

/// Reformat a JSON document.
///
/// Empty or whitespace-only input is an error rather than empty output so CLI
/// pipelines fail loudly on missing input.
pub fn reformat(input: &str, style: JsonStyle) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("no JSON input provided");
    }

    let value: Value = serde_json::from_str(trimmed).context("invalid JSON input")?;
    let rendered = match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(&value)?,
        JsonStyle::Compact => serde_json::to_string(&value)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_prints_with_two_space_indent() {
        let out = reformat("{\"b\":1,\"a\":[true,null]}", JsonStyle::Pretty).unwrap();
        assert!(out.contains("\n  \"a\": ["));
        assert!(out.contains("\n    true,"));
    }

    #[test]
    fn compact_strips_whitespace() {
        let out = reformat("{\n  \"a\" : 1\n}\n", JsonStyle::Compact).unwrap();
        assert_eq!(out, "{\"a\":1}");
    }

    #[test]
    fn parse_errors_carry_position_info() {
        let err = reformat("{\"a\": }", JsonStyle::Pretty).expect_err("invalid JSON must fail");
        let rendered = format!("{err:#}");
        assert!(rendered.contains("invalid JSON input"));
        assert!(rendered.contains("column"));
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(reformat("   \n", JsonStyle::Pretty).is_err());
    }
}
