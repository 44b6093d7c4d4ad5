use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["func"], "xlate.T");
    assert_eq!(parsed["template"], "{string}\n");
    assert_eq!(parsed["ignores"], Value::Array(Vec::new()));

    assert!(
        content.contains("\n  \"func\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command().arg("init"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "\u{2713} Created .xtractrc.json\n");
    assert_config_content(&test.read_file(".xtractrc.json")?)?;

    Ok(())
}

#[test]
fn test_init_config_exists() -> Result<()> {
    let test = CliTest::with_file(".xtractrc.json", r#"{ "func": "@app/i18n.T" }"#)?;

    let out = run(test.command().arg("init"))?;

    assert_eq!(out.code, Some(1));
    assert_eq!(out.stdout, "\u{2718} .xtractrc.json already exists\n");
    assert_eq!(
        test.read_file(".xtractrc.json")?,
        r#"{ "func": "@app/i18n.T" }"#
    );

    Ok(())
}

#[test]
fn test_init_then_extract() -> Result<()> {
    let test = CliTest::new()?;
    run(test.command().arg("init"))?;
    test.write_file(
        "app.ts",
        r#"import { T } from "xlate"; T("configured");"#,
    )?;

    let out = run(test.extract_command().arg("*.ts"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "configured\n");

    Ok(())
}
