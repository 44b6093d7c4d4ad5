use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_compare_all_keys_present() -> Result<()> {
    let test = CliTest::with_file("lang/en.json", r#"{"k1": "one", "k2": "two"}"#)?;
    test.write_file("lang/de.json", r#"{"k1": "eins", "k2": "zwei", "k3": "drei"}"#)?;
    test.write_file("lang/fr.json", r#"{"k2": "deux", "k1": "un"}"#)?;

    let out = run(test.compare_command().arg("lang/en.json"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(
        out.stdout,
        "\u{2713} 2 catalogs contain all keys of lang/en.json\n"
    );

    Ok(())
}

#[test]
fn test_compare_missing_key() -> Result<()> {
    let test = CliTest::with_file("en.json", r#"{"k1": "one", "k2": "two"}"#)?;
    test.write_file("de.json", r#"{"k1": "eins"}"#)?;

    let out = run(test.compare_command().arg("en.json"))?;

    assert_eq!(out.code, Some(1));
    insta::assert_snapshot!(out.stdout, @r"
✘ de.json is missing key k2, which is present in en.json
✘ 1 key missing
");

    Ok(())
}

#[test]
fn test_compare_after_extract() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        r#"
        import { T } from "xlate";
        const Title = "Inbox";
        T(Title);
        T("Compose");
        "#,
    )?;
    test.write_file(
        "lang/fr.json",
        r#"{"AA_NativeLangName": "Français", "Title": "Boîte de réception"}"#,
    )?;

    let out = run(test.extract_command().args([
        "src/*.ts",
        "-j",
        "--native-name",
        "English",
        "-o",
        "lang/en.json",
    ]))?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);

    let out = run(test.compare_command().arg("lang/en.json"))?;

    assert_eq!(out.code, Some(1));
    assert!(
        out.stdout
            .contains("lang/fr.json is missing key Compose, which is present in lang/en.json"),
        "stdout: {}",
        out.stdout
    );

    Ok(())
}

#[test]
fn test_compare_rejects_bad_reference() -> Result<()> {
    let test = CliTest::with_file("en.txt", "{}")?;

    let out = run(test.compare_command().arg("en.txt"))?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("must end with .json"), "stderr: {}", out.stderr);

    test.write_file("empty.json", "{}")?;
    let out = run(test.compare_command().arg("empty.json"))?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("No entries read from"), "stderr: {}", out.stderr);

    Ok(())
}
