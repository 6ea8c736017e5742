use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

#[test]
fn test_bad_language_pair() -> Result<()> {
    let test = CliTest::with_file("en.json", r#"{ "a": "A" }"#)?;

    let output = test.command().args(["-i", "en.json", "-t", "entr"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("source-target"));

    Ok(())
}

#[test]
fn test_unreachable_backend_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("en.json", r#"{ "a": "A" }"#)?;

    let output = test
        .command()
        .args(["-i", "en.json", "-t", "en-tr", "--to", "json", "-o", "tr.json"])
        .args(["--api-url", "http://127.0.0.1:9"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("127.0.0.1:9"));
    assert_eq!(stdout(&output), "");
    assert!(!test.root().join("tr.json").exists());

    Ok(())
}

/// A LibreTranslate stand-in on a local port: English to Turkish only, and
/// every text comes back with a `_tr` suffix.
fn serve_libre_translate() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let Ok((path, body)) = read_request(&mut stream) else {
                continue;
            };
            let reply = match path.as_str() {
                "/languages" => json!([{ "code": "en", "name": "English", "targets": ["tr"] }]),
                "/translate" => {
                    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                    let texts: Vec<String> = request["q"]
                        .as_array()
                        .into_iter()
                        .flatten()
                        .map(|text| format!("{}_tr", text.as_str().unwrap_or_default()))
                        .collect();
                    json!({ "translatedText": texts })
                }
                _ => json!({ "error": "not found" }),
            };
            let reply = reply.to_string();
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.len(),
                reply
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    Ok(url)
}

fn read_request(stream: &mut TcpStream) -> std::io::Result<(String, String)> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut content_length = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;
    let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
    Ok((path, String::from_utf8_lossy(&body).into_owned()))
}

#[test]
fn test_translate_rebuilds_nested_tree() -> Result<()> {
    let url = serve_libre_translate()?;
    let test = CliTest::with_file(
        "en.json",
        r#"{ "app": { "title": "Hello", "menu": ["Open", "Close"] }, "count": "3" }"#,
    )?;

    let output = test
        .command()
        .args(["-i", "en.json", "-t", "en-tr", "--to", "json", "-o", "tr.json"])
        .args(["--api-url", url.as_str(), "--chunk-size", "3", "--chunk-delay", "1"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "File saved to: tr.json\n");
    assert_eq!(
        test.read_file("tr.json")?,
        r#"{
  "app": {
    "title": "Hello_tr",
    "menu": [
      "Open_tr",
      "Close_tr"
    ]
  },
  "count": "3_tr"
}
"#
    );

    Ok(())
}

#[test]
fn test_translate_unsupported_target_writes_nothing() -> Result<()> {
    let url = serve_libre_translate()?;
    let test = CliTest::with_file("en.json", r#"{ "a": "A" }"#)?;

    let output = test
        .command()
        .args(["-i", "en.json", "-t", "en-ja", "--to", "json", "-o", "ja.json"])
        .args(["--api-url", url.as_str()])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Target language 'ja'"));
    assert!(!test.root().join("ja.json").exists());

    Ok(())
}
