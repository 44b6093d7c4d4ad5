use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const APP: &str = r#"
import { T } from "xlate";

const Greeting = "Hello";
const Farewell = "Bye";

export function App(name: string) {
    return [T(Greeting), T(Farewell), T("Hello"), T(name)];
}
"#;

#[test]
fn test_extract_template_to_stdout() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;

    let out = run(test.extract_command().arg("src/*.ts"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    insta::assert_snapshot!(out.stdout, @r"
Bye
Hello
");
    assert_eq!(out.stderr, "");

    Ok(())
}

#[test]
fn test_extract_custom_template() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;

    let out = run(test
        .extract_command()
        .args(["src/app.ts", "--template", r#"msgid "{string}"\n"#]))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "msgid \"Bye\"\nmsgid \"Hello\"\n");

    Ok(())
}

#[test]
fn test_extract_json_to_file() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;
    test.write_file(
        "src/other.tsx",
        r#"
        import * as xlate from "xlate";
        const Greeting2 = "Hello";
        export const Page = () => <p>{xlate.T(Greeting2)}{xlate.T("Welcome back!")}</p>;
        "#,
    )?;

    let out = run(test.extract_command().args([
        "src/**/*.ts*",
        "-j",
        "--native-name",
        "English",
        "-o",
        "en.json",
    ]))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "");
    assert!(
        out.stderr
            .contains("Extracted 3 strings from 6 call sites in 2 files to en.json"),
        "stderr: {}",
        out.stderr
    );

    // "Hello" is named by both Greeting and Greeting2, so its key comes from the text.
    assert_eq!(
        test.read_file("en.json")?,
        r#"{
  "AA_NativeLangName": "English",
  "Farewell": "Bye",
  "Hello": "Hello",
  "Welcome_back_": "Welcome back!"
}
"#
    );

    Ok(())
}

#[test]
fn test_extract_cross_file_constants() -> Result<()> {
    let test = CliTest::with_file(
        "src/strings.ts",
        r#"export const SaveLabel = "Save";"#,
    )?;
    test.write_file(
        "src/form.ts",
        r#"
        import { T as tr } from "xlate";
        import { SaveLabel } from "./strings";
        tr(SaveLabel);
        "#,
    )?;

    let out = run(test.extract_command().args(["src/*.ts", "-j"]))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "{\n  \"SaveLabel\": \"Save\"\n}\n");

    Ok(())
}

#[test]
fn test_extract_func_from_config() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        r#"
        import { translate } from "@app/i18n";
        import { T } from "xlate";
        translate("from config");
        T("default target");
        "#,
    )?;
    test.write_file(".xtractrc.json", r#"{ "func": "@app/i18n.translate" }"#)?;

    let out = run(test.extract_command().arg("src/*.ts"))?;
    assert_eq!(out.stdout, "from config\n");

    // The flag wins over the config file.
    let out = run(test.extract_command().args(["src/*.ts", "--func", "xlate.T"]))?;
    assert_eq!(out.stdout, "default target\n");

    Ok(())
}

#[test]
fn test_extract_config_ignores() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;
    test.write_file(
        "src/generated/gen.ts",
        r#"import { T } from "xlate"; T("generated");"#,
    )?;
    test.write_file(".xtractrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;

    let out = run(test.extract_command().arg("src/**/*.ts"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "Bye\nHello\n");

    Ok(())
}

#[test]
fn test_extract_invalid_func() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;

    let out = run(test.extract_command().args(["src/*.ts", "--func", "T"]))?;

    assert_eq!(out.code, Some(2));
    assert_eq!(out.stdout, "");
    assert!(out.stderr.contains("Error: Invalid '--func'"), "stderr: {}", out.stderr);

    Ok(())
}

#[test]
fn test_extract_no_files() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.extract_command().arg("src/*.ts"))?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Found 0 files"), "stderr: {}", out.stderr);

    Ok(())
}

#[test]
fn test_extract_parse_error_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;
    test.write_file("src/broken.ts", "import { T } from 'xlate';\nT('oops';\n")?;

    let out = run(test.extract_command().args(["src/*.ts", "-j", "-o", "en.json"]))?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("broken.ts"), "stderr: {}", out.stderr);
    assert!(!test.root().join("en.json").exists());

    Ok(())
}

#[test]
fn test_extract_verbose_logs() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;

    let out = run(test.extract_command().args(["src/*.ts", "-v"]))?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "Bye\nHello\n");
    assert!(out.stderr.contains("DEBUG"), "stderr: {}", out.stderr);
    assert!(out.stderr.contains("to stdout"), "stderr: {}", out.stderr);

    Ok(())
}
