use std::path::Path;
use std::process::{Command, Output};

use image::RgbImage;
use serde_json::Value;
use tempfile::TempDir;

const PAGE: &str = r#"<!doctype html>
<html>
  <head>
    <title>Example</title>
    <meta name="description" content="An example page">
  </head>
  <body><h1>Welcome</h1><p>Some text.</p></body>
</html>"#;

fn write_inputs(dir: &Path) -> (String, String) {
    let shot = dir.join("shot.png");
    let html = dir.join("page.html");
    let img = RgbImage::from_fn(32, 32, |x, y| image::Rgb([(x * 8) as u8, (y * 8) as u8, 90]));
    img.save(&shot).expect("write screenshot");
    std::fs::write(&html, PAGE).expect("write html");
    (
        shot.to_str().unwrap().to_string(),
        html.to_str().unwrap().to_string(),
    )
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sitegrade"))
        .args(args)
        .output()
        .expect("run sitegrade")
}

fn parse_json(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("output should be valid JSON")
}

#[test]
fn analyze_offline_scores_local_inputs_and_writes_report() {
    let dir = TempDir::new().expect("tempdir");
    let (shot, html) = write_inputs(dir.path());
    let report_dir = dir.path().join("reports");

    let out = run(&[
        "analyze",
        "--url",
        "example.com",
        "--competitors",
        "rival.test\nother.test",
        "--screenshot",
        &shot,
        "--html",
        &html,
        "--offline",
        "--no-ocr",
        "--seed",
        "7",
        "--report",
        report_dir.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let json = parse_json(&out.stdout);
    assert_eq!(json["mode"], "analysis");
    assert_eq!(json["version"], "1.0");
    let result = &json["result"];
    assert_eq!(result["url"], "https://example.com");
    assert_eq!(result["scores"]["seo"]["seo_metadata"], 100.0);
    assert_eq!(result["scores"]["seo"]["keywords"], 70.0);
    assert_eq!(result["scores"]["content"]["freshness"], 80.0);
    assert_eq!(result["scores"]["ux_ui"]["navigation"], 60.0);
    assert_eq!(result["competitors"].as_array().unwrap().len(), 2);
    let rows: Vec<&str> = result["competitor_scores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        rows,
        vec!["https://example.com", "https://rival.test", "https://other.test"]
    );

    let degraded: Vec<&str> = result["degradations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["source"].as_str().unwrap())
        .collect();
    assert_eq!(degraded, vec!["typography"]);

    let report = report_dir.join("website_analysis_report.json");
    assert!(report.exists());
    let saved = parse_json(&std::fs::read(report).unwrap());
    assert_eq!(saved["url"], "https://example.com");
}

#[test]
fn analyze_is_reproducible_with_a_seed() {
    let dir = TempDir::new().expect("tempdir");
    let (shot, html) = write_inputs(dir.path());
    let args = [
        "analyze", "--url", "example.com", "--screenshot", &shot, "--html", &html,
        "--offline", "--no-ocr", "--seed", "42", "--format", "json",
    ];
    let first = parse_json(&run(&args).stdout);
    let second = parse_json(&run(&args).stdout);
    assert_eq!(first["result"]["scores"], second["result"]["scores"]);
    assert_eq!(first["result"]["summary"], second["result"]["summary"]);
}

#[test]
fn analyze_offline_without_inputs_still_succeeds() {
    let out = run(&[
        "analyze", "--url", "example.com", "--offline", "--no-ocr", "--format", "json",
    ]);
    assert_eq!(out.status.code(), Some(0));
    let json = parse_json(&out.stdout);
    let sources: Vec<&str> = json["result"]["degradations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["source"].as_str().unwrap())
        .collect();
    assert!(sources.contains(&"screenshot"));
    assert!(sources.contains(&"html"));
    assert_eq!(json["result"]["scores"]["seo"]["seo_metadata"], 0.0);
}

#[test]
fn invalid_url_is_fatal_config_error() {
    let out = run(&[
        "analyze", "--url", "ftp://example.com", "--offline", "--no-ocr", "--format", "json",
    ]);
    assert_eq!(out.status.code(), Some(2));
    let json = parse_json(&out.stdout);
    assert_eq!(json["mode"], "error");
    assert_eq!(json["error"]["category"], "config");
}

#[test]
fn weights_not_summing_to_one_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = dir.path().join("sitegrade.toml");
    std::fs::write(&cfg, "[weights]\nkeywords = 0.9\n").expect("write config");

    let out = run(&[
        "analyze",
        "--url",
        "example.com",
        "--offline",
        "--config",
        cfg.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(out.status.code(), Some(2));
    let json = parse_json(&out.stdout);
    assert_eq!(json["error"]["category"], "config");
}

#[test]
fn missing_config_file_is_fatal() {
    let out = run(&[
        "analyze",
        "--url",
        "example.com",
        "--config",
        "/nonexistent/sitegrade.toml",
        "--format",
        "json",
    ]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn yaml_output_is_tagged_by_mode() {
    let out = run(&[
        "analyze", "--url", "example.com", "--offline", "--no-ocr", "--format", "yaml",
    ]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("mode: analysis"), "{stdout}");
}
