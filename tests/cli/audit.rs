use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const MESSAGES: &str = r#"{ "app": { "title": "Hello", "old": "Old" } }"#;

const APP_JS: &str = "const title = i18n.t('app.title');
const label = i18n.t(labelKey);
const missing = i18n.t('app.missing');
";

#[test]
fn test_audit_csv_report() -> Result<()> {
    let test = CliTest::with_file("en.json", MESSAGES)?;
    test.write_file("src/app.js", APP_JS)?;

    let output = test.audit_command("en.json").args(["--src", "src"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_snapshot!(stdout(&output), @r"
    status,key,value,similar,source
    USED,app.title,Hello,,src/app.js:1:19
    UNDEFINED,app.missing,,,src/app.js:3:21
    VARIABLE,labelKey,,,src/app.js:2:19
    UNUSED,app.old,Old,,
    ");

    Ok(())
}

#[test]
fn test_audit_options_trim_report() -> Result<()> {
    let test = CliTest::with_file("en.json", MESSAGES)?;
    test.write_file("src/app.js", APP_JS)?;

    let output = test
        .audit_command("en.json")
        .args(["--src", "src", "--no-source", "--no-attention"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        stdout(&output),
        "status,key,value,similar,source\n\
         USED,app.title,Hello,,\n\
         VARIABLE,labelKey,,,\n\
         UNUSED,app.old,Old,,\n"
    );

    Ok(())
}

#[test]
fn test_audit_similar_dynamic_key() -> Result<()> {
    let test = CliTest::with_file(
        "en.json",
        r#"{ "menu": { "home": "Home", "about": "About" } }"#,
    )?;
    test.write_file("src/nav.js", "const link = i18n.t(`menu.${page}`);\n")?;

    let output = test.audit_command("en.json").args(["--to", "json"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(rows[0]["status"], "DYNAMIC");
    assert_eq!(rows[0]["key"], "menu.${page}");
    assert_eq!(rows[0]["similar"], "menu.home");
    assert!(rows[0]["source"].as_str().unwrap_or_default().ends_with("src/nav.js:1:18"));
    assert_eq!(rows[1]["status"], "UNUSED");
    assert_eq!(rows[1]["similar"], "menu.${page}");

    Ok(())
}

#[test]
fn test_audit_loose_strings_from_config() -> Result<()> {
    let test = CliTest::with_file("en.json", r#"{ "nav": { "home": "Home" }, "x": "X" }"#)?;
    test.write_file("src/routes.js", "export const routes = [{ label: 'nav.home' }];\n")?;
    test.write_file("src/skip.js", "t('x')\n")?;
    test.write_file(
        ".i18nauditrc.json",
        r#"{ "src": ["src"], "excludes": ["skip.js"], "loose": true }"#,
    )?;

    let output = test.audit_command("en.json").arg("--no-source").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        stdout(&output),
        "status,key,value,similar,source\nUSED,nav.home,Home,,\nUNUSED,x,X,,\n"
    );

    Ok(())
}

#[test]
fn test_audit_html_output_file() -> Result<()> {
    let test = CliTest::with_file("en.json", MESSAGES)?;
    test.write_file("src/app.js", APP_JS)?;

    let output = test
        .audit_command("en.json")
        .args(["--src", "src", "--to", "html", "-o", "report.html"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("File saved to: report.html"));

    let html = test.read_file("report.html")?;
    assert!(html.contains("<th>status</th><th>key</th><th>value</th><th>similar</th><th>source</th>"));
    assert!(html.contains("<td>UNDEFINED</td><td>app.missing</td>"));

    Ok(())
}

#[test]
fn test_audit_missing_source_dir_fails() -> Result<()> {
    let test = CliTest::with_file("en.json", MESSAGES)?;

    let output = test
        .audit_command("en.json")
        .args(["--src", "nowhere", "-o", "report.csv"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("nowhere"));
    assert!(!test.root().join("report.csv").exists());

    Ok(())
}

#[test]
fn test_audit_and_translate_conflict() -> Result<()> {
    let test = CliTest::with_file("en.json", MESSAGES)?;

    let output = test.audit_command("en.json").args(["-t", "en-tr"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--translate and --audit"));
    assert_eq!(stdout(&output), "");

    Ok(())
}
