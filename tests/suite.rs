// Centralized integration suite for the tool catalog helpers; exercises the
// resolver tier contract, catalog loading rules, HTML rendering, and the
// helper binaries so changes surface in one place.
mod support;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use std::io::Write;
use std::process::Stdio;
use support::{
    catalog_lint_bin, json_fmt_bin, related_bin, render_index_bin, render_panel_bin, run_ok,
    stderr_str, stdout_str, write_catalog,
};
use toolrack::{
    CatalogIndex, RelatedToolsResolver, ToolSlug, Variant, render_related_with,
};

fn slug(raw: &str) -> ToolSlug {
    ToolSlug(raw.to_string())
}

fn fixture_value() -> Value {
    json!({
        "schema_version": "tool_catalog_v1",
        "tools": {
            "alpha": {"name": "Alpha", "path": "./alpha/"},
            "beta": {"name": "Beta", "path": "./beta.html"},
            "gamma": {"name": "Gamma", "path": "./gamma/"},
            "delta": {"name": "Delta", "path": "./delta/"},
            "epsilon": {"name": "Epsilon", "path": "./epsilon/"},
            "zeta": {"name": "Zeta", "path": "./zeta/"}
        },
        "manual_related": {
            "alpha": ["beta", "ghost", "alpha", "gamma", "delta", "epsilon"],
            "island": ["island"],
            "pair": ["beta", "gamma"]
        },
        "categories": [
            {"id": "greek", "members": ["beta", "gamma", "delta", "epsilon", "zeta"]},
            {"id": "isles", "members": ["island", "alpha"]}
        ]
    })
}

fn fixture_index() -> Result<(tempfile::TempDir, CatalogIndex)> {
    let (dir, path) = write_catalog(&fixture_value())?;
    let index = CatalogIndex::load(&path)?;
    Ok((dir, index))
}

// --- resolver contract against the built-in catalog ---

#[test]
fn builtin_manual_examples_resolve_in_table_order() -> Result<()> {
    let index = CatalogIndex::builtin()?;
    let resolver = RelatedToolsResolver::new(&index);

    let resolved = resolver.resolve(&slug("json"));
    let slugs: Vec<&str> = resolved.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, ["base64", "yamljson", "text-formatter"]);
    assert_eq!(resolved[0].name, "Base64変換");
    assert_eq!(resolved[0].path, "./base64.html");

    let resolved = resolver.resolve(&slug("moji_count"));
    let slugs: Vec<&str> = resolved.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, ["text-formatter", "line-tab-converter", "kutouten"]);
    Ok(())
}

#[test]
fn builtin_manual_tier_never_returns_self_or_exceeds_limit() -> Result<()> {
    let index = CatalogIndex::builtin()?;
    let resolver = RelatedToolsResolver::new(&index);

    for (current, mapping) in &index.catalog().manual_related {
        let resolved = resolver.resolve(current);
        assert!(resolved.len() <= toolrack::CURATED_LIMIT);
        assert!(resolved.iter().all(|t| &t.slug != current));

        let expected: Vec<&ToolSlug> = mapping
            .iter()
            .filter(|s| *s != current)
            .take(toolrack::CURATED_LIMIT)
            .collect();
        let actual: Vec<&ToolSlug> = resolved.iter().map(|t| &t.slug).collect();
        assert_eq!(actual, expected, "order mismatch for {current}");
    }
    Ok(())
}

#[test]
fn curated_tiers_are_idempotent() -> Result<()> {
    let index = CatalogIndex::builtin()?;
    let resolver = RelatedToolsResolver::new(&index);
    for current in ["json", "cron", "base-converter"] {
        assert_eq!(
            resolver.resolve(&slug(current)),
            resolver.resolve(&slug(current))
        );
    }
    Ok(())
}

// --- fallback tiers against a fixture catalog loaded from disk ---

#[test]
fn category_tier_answers_for_slugs_without_manual_entries() -> Result<()> {
    let (_dir, index) = fixture_index()?;
    let resolver = RelatedToolsResolver::new(&index);
    let resolved = resolver.resolve(&slug("beta"));
    let slugs: Vec<&str> = resolved.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, ["gamma", "delta", "epsilon", "zeta"]);
    Ok(())
}

#[test]
fn manual_entry_short_circuits_category_tier_even_when_empty() -> Result<()> {
    // "island" is a member of the "isles" category, but its manual entry
    // (listing only itself) filters to empty and still wins the tier race.
    let (_dir, index) = fixture_index()?;
    let resolver = RelatedToolsResolver::new(&index);
    assert!(resolver.resolve(&slug("island")).is_empty());
    assert!(
        render_related_with(
            &index,
            &slug("island"),
            Variant::Default,
            &mut StdRng::seed_from_u64(3)
        )
        .is_none()
    );
    Ok(())
}

#[test]
fn dangling_references_fall_back_to_derived_display_info() -> Result<()> {
    let (_dir, index) = fixture_index()?;
    let resolver = RelatedToolsResolver::new(&index);
    let resolved = resolver.resolve(&slug("alpha"));
    let ghost = resolved
        .iter()
        .find(|t| t.slug.as_str() == "ghost")
        .expect("ghost entry survives resolution");
    assert_eq!(ghost.name, "ghost");
    assert_eq!(ghost.path, "./ghost/");
    Ok(())
}

#[test]
fn random_tier_samples_three_from_the_universe() -> Result<()> {
    let (_dir, index) = fixture_index()?;
    let resolver = RelatedToolsResolver::new(&index);

    let resolved = resolver.resolve_with(&slug("orphan"), &mut StdRng::seed_from_u64(42));
    assert_eq!(resolved.len(), toolrack::RANDOM_SAMPLE);
    assert!(resolved.iter().all(|t| t.slug.as_str() != "orphan"));
    for tool in &resolved {
        assert!(index.info(&tool.slug).is_some(), "sampled outside universe");
    }

    let replay = resolver.resolve_with(&slug("orphan"), &mut StdRng::seed_from_u64(42));
    assert_eq!(resolved, replay);
    Ok(())
}

#[test]
fn two_entry_manual_results_suppress_the_panel() -> Result<()> {
    let (_dir, index) = fixture_index()?;
    assert!(
        render_related_with(
            &index,
            &slug("pair"),
            Variant::Sidebar,
            &mut StdRng::seed_from_u64(3)
        )
        .is_none()
    );
    Ok(())
}

#[test]
fn builtin_panel_renders_resolved_names() -> Result<()> {
    let index = CatalogIndex::builtin()?;
    let html = render_related_with(
        &index,
        &slug("json"),
        Variant::Default,
        &mut StdRng::seed_from_u64(3),
    )
    .expect("json panel renders");
    assert!(html.contains("<section"));
    assert!(html.contains("Base64変換"));
    assert!(html.contains("href=\"./yamljson/\""));
    assert!(html.contains("テキスト整形"));
    Ok(())
}

// --- catalog loading rules ---

#[test]
fn load_rejects_catalogs_that_fail_the_schema() -> Result<()> {
    let (_dir, path) = write_catalog(&json!({
        "schema_version": "tool_catalog_v1",
        "manual_related": {},
        "categories": []
    }))?;
    let err = CatalogIndex::load(&path).expect_err("missing tools table must fail");
    assert!(format!("{err:#}").contains("schema validation"));
    Ok(())
}

// --- helper binaries ---

#[test]
fn related_bin_emits_json_records() -> Result<()> {
    let output = run_ok({
        let mut cmd = related_bin();
        cmd.arg("json");
        cmd
    })?;
    let records: Vec<Value> = serde_json::from_str(stdout_str(&output).trim())?;
    let slugs: Vec<&str> = records
        .iter()
        .filter_map(|r| r.get("slug").and_then(Value::as_str))
        .collect();
    assert_eq!(slugs, ["base64", "yamljson", "text-formatter"]);
    Ok(())
}

#[test]
fn related_bin_text_format_lists_one_tool_per_line() -> Result<()> {
    let output = run_ok({
        let mut cmd = related_bin();
        cmd.arg("--slug").arg("moji_count").arg("--format").arg("text");
        cmd
    })?;
    let stdout = stdout_str(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("text-formatter\t"));
    assert!(lines[2].contains("句読点一括置換ツール"));
    Ok(())
}

#[test]
fn related_bin_seed_makes_the_random_tier_reproducible() -> Result<()> {
    let (_dir, path) = write_catalog(&fixture_value())?;
    let run = || {
        run_ok({
            let mut cmd = related_bin();
            cmd.arg("orphan")
                .arg("--catalog")
                .arg(&path)
                .arg("--seed")
                .arg("9");
            cmd
        })
    };
    let first = run()?;
    let second = run()?;
    assert_eq!(stdout_str(&first), stdout_str(&second));

    let records: Vec<Value> = serde_json::from_str(stdout_str(&first).trim())?;
    assert_eq!(records.len(), 3);
    Ok(())
}

#[test]
fn related_bin_honors_the_catalog_env_override() -> Result<()> {
    let (_dir, path) = write_catalog(&fixture_value())?;
    let output = run_ok({
        let mut cmd = related_bin();
        cmd.arg("beta").env(toolrack::CATALOG_ENV, &path);
        cmd
    })?;
    let records: Vec<Value> = serde_json::from_str(stdout_str(&output).trim())?;
    let slugs: Vec<&str> = records
        .iter()
        .filter_map(|r| r.get("slug").and_then(Value::as_str))
        .collect();
    assert_eq!(slugs, ["gamma", "delta", "epsilon", "zeta"]);
    Ok(())
}

#[test]
fn related_bin_fails_on_missing_or_invalid_catalogs() -> Result<()> {
    let output = related_bin()
        .arg("json")
        .arg("--catalog")
        .arg("/nonexistent/tools.json")
        .output()?;
    assert!(!output.status.success());

    let (_dir, path) = write_catalog(&json!({
        "schema_version": "tool_catalog_v1",
        "manual_related": {},
        "categories": []
    }))?;
    let output = related_bin().arg("json").arg("--catalog").arg(&path).output()?;
    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("schema validation"));
    Ok(())
}

#[test]
fn render_panel_bin_prints_markup_or_nothing() -> Result<()> {
    let output = run_ok({
        let mut cmd = render_panel_bin();
        cmd.arg("json").arg("--variant").arg("sidebar");
        cmd
    })?;
    let stdout = stdout_str(&output);
    assert!(stdout.contains("<section"));
    assert!(stdout.contains("関連ツール"));

    let (_dir, path) = write_catalog(&fixture_value())?;
    let output = run_ok({
        let mut cmd = render_panel_bin();
        cmd.arg("island").arg("--catalog").arg(&path);
        cmd
    })?;
    assert!(stdout_str(&output).is_empty());
    Ok(())
}

#[test]
fn render_index_bin_prints_the_landing_page() -> Result<()> {
    let output = run_ok(render_index_bin())?;
    let stdout = stdout_str(&output);
    assert!(stdout.contains("Pokoro"));
    assert!(stdout.contains("JSONフォーマッター"));
    assert!(stdout.contains("</html>"));
    Ok(())
}

#[test]
fn json_fmt_bin_formats_and_rejects_input() -> Result<()> {
    let pretty = pipe_json_fmt(&["--stdin"], "{\"b\":1,\"a\":2}")?;
    assert!(pretty.status.success());
    assert!(stdout_str(&pretty).contains("  \"a\": 2"));

    let compact = pipe_json_fmt(&["--stdin", "--compact"], "{ \"a\" : 2 }")?;
    assert!(compact.status.success());
    assert_eq!(stdout_str(&compact).trim(), "{\"a\":2}");

    let invalid = pipe_json_fmt(&["--stdin"], "{\"a\": }")?;
    assert!(!invalid.status.success());
    assert!(stderr_str(&invalid).contains("column"));
    Ok(())
}

#[test]
fn catalog_lint_bin_reports_findings_without_failing_on_warnings() -> Result<()> {
    let output = run_ok(catalog_lint_bin())?;
    let report: Value = serde_json::from_str(stdout_str(&output).trim())?;
    assert_eq!(report["errors"], json!(0));
    assert_eq!(report["warnings"], json!(0));

    let (_dir, path) = write_catalog(&fixture_value())?;
    let output = run_ok({
        let mut cmd = catalog_lint_bin();
        cmd.arg("--catalog").arg(&path);
        cmd
    })?;
    let report: Value = serde_json::from_str(stdout_str(&output).trim())?;
    assert_eq!(report["errors"], json!(0));
    assert!(report["warnings"].as_u64().unwrap() > 0);
    let messages: Vec<&str> = report["findings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f.get("message").and_then(Value::as_str))
        .collect();
    assert!(messages.iter().any(|m| m.contains("unknown tool 'ghost'")));
    Ok(())
}

#[test]
fn catalog_lint_bin_fails_on_error_level_findings() -> Result<()> {
    let (_dir, path) = write_catalog(&json!({
        "schema_version": "tool_catalog_v1",
        "tools": {"a": {"name": "  ", "path": "./a/"}},
        "manual_related": {},
        "categories": [{"id": "misc", "members": ["a"]}]
    }))?;
    let output = catalog_lint_bin().arg("--catalog").arg(&path).output()?;
    assert!(!output.status.success());
    let report: Value = serde_json::from_str(stdout_str(&output).trim())?;
    assert!(report["errors"].as_u64().unwrap() > 0);
    Ok(())
}

fn pipe_json_fmt(args: &[&str], input: &str) -> Result<std::process::Output> {
    let mut child = json_fmt_bin()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .as_mut()
        .expect("stdin is piped")
        .write_all(input.as_bytes())?;
    Ok(child.wait_with_output()?)
}
