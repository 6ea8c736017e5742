use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

#[test]
fn test_json_to_csv_on_stdout() -> Result<()> {
    let test = CliTest::with_file(
        "en.json",
        r#"{ "app": { "title": "Hello, world" }, "steps": ["One", "Two"] }"#,
    )?;

    let output = test.command().args(["-i", "en.json"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        stdout(&output),
        "key,value\napp.title,\"Hello, world\"\nsteps[0],One\nsteps[1],Two\n"
    );

    Ok(())
}

#[test]
fn test_csv_to_json_file() -> Result<()> {
    let test = CliTest::with_file(
        "tr.csv",
        "key,value\napp.title,Merhaba\napp.menu.home,Ana sayfa\nsteps[0],Bir\n",
    )?;

    let output = test
        .command()
        .args(["-i", "tr.csv", "--to", "json", "-o", "tr.json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "File saved to: tr.json\n");

    let written: Value = serde_json::from_str(&test.read_file("tr.json")?)?;
    assert_eq!(
        written,
        json!({
            "app": { "title": "Merhaba", "menu": { "home": "Ana sayfa" } },
            "steps": ["Bir"]
        })
    );

    Ok(())
}

#[test]
fn test_json_to_html() -> Result<()> {
    let test = CliTest::with_file("en.json", r#"{ "greeting": "<b>Hi</b>" }"#)?;

    let output = test.command().args(["-i", "en.json", "--to", "html"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let html = stdout(&output);
    assert!(html.contains("<td>greeting</td><td>&lt;b&gt;Hi&lt;/b&gt;</td>"));

    Ok(())
}

#[test]
fn test_same_format_without_translate_fails() -> Result<()> {
    let test = CliTest::with_file("en.csv", "key,value\na,A\n")?;

    let output = test.command().args(["-i", "en.csv", "--to", "csv"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("only allowed with --translate"));
    assert_eq!(stdout(&output), "");

    Ok(())
}

#[test]
fn test_script_input_is_refused() -> Result<()> {
    let test = CliTest::with_file("en.js", "module.exports = { a: 'A' };\n")?;

    let output = test.command().args(["-i", "en.js", "-o", "en.csv"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Refusing to execute"));
    assert!(!test.root().join("en.csv").exists());

    Ok(())
}

#[test]
fn test_missing_input_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["-i", "missing.json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("missing.json"));

    Ok(())
}

#[test]
fn test_conflicting_tree_paths_fail() -> Result<()> {
    let test = CliTest::with_file("en.csv", "key,value\na,A\na.b,B\n")?;

    let output = test.command().args(["-i", "en.csv", "--to", "json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");

    Ok(())
}
