use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

fn run_session(script: &str) -> (Option<i32>, Vec<Value>) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sitegrade"))
        .args(["session", "--offline", "--no-ocr", "--seed", "5", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn sitegrade");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    let out = child.wait_with_output().expect("wait");
    let lines = String::from_utf8_lossy(&out.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect();
    (out.status.code(), lines)
}

#[test]
fn session_keeps_history_and_comparisons() {
    let (code, lines) = run_session(
        "analyze example.com rival.test\nanalyze second.test\nhistory\ncompare\nshow 0\nquit\nhistory\n",
    );
    assert_eq!(code, Some(0));
    let modes: Vec<&str> = lines.iter().map(|v| v["mode"].as_str().unwrap()).collect();
    assert_eq!(modes, vec!["analysis", "analysis", "history", "comparison", "analysis"]);

    let entries = lines[2]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["url"], "https://second.test");
    assert_eq!(entries[0]["index"], 1);
    assert_eq!(entries[1]["url"], "https://example.com");
    assert_eq!(entries[1]["index"], 0);

    // latest run had no competitors
    assert_eq!(lines[3]["url"], "https://second.test");
    assert!(lines[3]["sites"].as_array().unwrap().is_empty());

    assert_eq!(lines[4]["result"]["url"], "https://example.com");
    assert_eq!(lines[4]["result"]["competitors"][0], "https://rival.test");
}

#[test]
fn site_scores_match_as_main_and_as_competitor() {
    let (code, lines) = run_session("analyze rival.test other.test\nanalyze me.test rival.test\n");
    assert_eq!(code, Some(0));
    let first = &lines[0]["result"]["competitor_scores"][0];
    let second = &lines[1]["result"]["competitor_scores"][1];
    assert_eq!(first["url"], "https://rival.test");
    assert_eq!(first, second);
}

#[test]
fn session_errors_do_not_end_the_session() {
    let (code, lines) = run_session("compare\nfrobnicate\nshow 3\nanalyze example.com\n");
    assert_eq!(code, Some(0));
    let modes: Vec<&str> = lines.iter().map(|v| v["mode"].as_str().unwrap()).collect();
    assert_eq!(modes, vec!["error", "error", "error", "analysis"]);
    assert_eq!(lines[0]["error"]["category"], "session");
}

#[test]
fn session_report_writes_empty_object_before_any_analysis() {
    let dir = TempDir::new().expect("tempdir");
    let script = format!("report {}\n", dir.path().display());
    let (_, lines) = run_session(&script);
    assert_eq!(lines[0]["mode"], "report");
    assert_eq!(lines[0]["has_analysis"], false);
    assert_eq!(lines[0]["mime_type"], "application/json");
    let body = std::fs::read_to_string(dir.path().join("website_analysis_report.json")).unwrap();
    assert_eq!(body, "{}");
}
