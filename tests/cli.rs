// tests/cli.rs
// =============================================================================
// End-to-end tests that run the real `miles` binary.
//
// A wiremock server plays the web site. The binary runs on a blocking
// thread so the mock server keeps answering while we wait for it.
// =============================================================================

use std::path::PathBuf;
use std::process::Output;

use assert_cmd::assert::OutputAssertExt; // .assert() on a finished Output
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Runs `miles` with `args` and waits for it to exit
async fn run_miles(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("miles")
            .unwrap()
            .env_remove("RUST_LOG")
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

async fn serve(server: &MockServer, at: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_progress_line_then_report() {
    let server = MockServer::start().await;
    serve(&server, "/", br#"<img src="pics/cat.jpg">"#.to_vec()).await;
    serve(&server, "/pics/cat.jpg", vec![4u8; 2048]).await;

    let dir = TempDir::new().unwrap();
    // Two levels that don't exist yet
    let destination: PathBuf = dir.path().join("new").join("nested");

    let output = run_miles(vec![
        "-d".to_string(),
        destination.display().to_string(),
        "-f".to_string(),
        "jpg".to_string(),
        format!("{}/", server.uri()),
    ])
    .await;

    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let progress = format!("Downloading {}/pics/cat.jpg...", server.uri());

    output
        .assert()
        .success()
        .stdout(predicate::str::contains(progress.as_str()))
        .stdout(predicate::str::contains("Files Downloaded: 1"))
        .stdout(predicate::str::contains("Bytes Downloaded: 0.00 MB"))
        .stdout(predicate::str::contains("Elapsed Time:"))
        .stdout(predicate::str::contains("Bandwidth:"));

    // Progress comes before the report
    let progress_at = stdout.find(&progress).unwrap();
    let report_at = stdout.find("Files Downloaded:").unwrap();
    assert!(progress_at < report_at);

    assert!(destination.is_dir());
    assert_eq!(std::fs::metadata(destination.join("cat.jpg")).unwrap().len(), 2048);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_page_reports_zero_and_exits_ok() {
    let dir = TempDir::new().unwrap();

    let output = run_miles(vec![
        "-d".to_string(),
        dir.path().display().to_string(),
        "http://127.0.0.1:1/".to_string(),
    ])
    .await;

    output
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Files Downloaded: 0"))
        .stdout(predicate::str::contains("Bytes Downloaded: 0.00 MB"))
        .stdout(predicate::str::contains("Downloading").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_report() {
    let server = MockServer::start().await;
    serve(&server, "/docs/", br#"<a href="guide.pdf">guide</a>"#.to_vec()).await;
    serve(&server, "/docs/guide.pdf", vec![1u8; 1000]).await;

    let dir = TempDir::new().unwrap();

    let output = run_miles(vec![
        "--json".to_string(),
        "-f".to_string(),
        "pdf".to_string(),
        "-d".to_string(),
        dir.path().display().to_string(),
        format!("{}/docs/", server.uri()),
    ])
    .await;

    assert!(output.status.success());

    // Progress lines come first, the JSON object starts at the first '{'
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();

    assert_eq!(report["files_downloaded"], 1);
    assert_eq!(report["bytes_downloaded"], 1000);
    assert!(report["megabytes"].is_f64());
    assert!(report["elapsed_seconds"].is_f64());
    assert!(report["bandwidth"].is_f64());
}

#[test]
fn test_unknown_file_type_is_usage_error() {
    Command::cargo_bin("miles")
        .unwrap()
        .args(["-f", "gif", "https://example.com/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("gif"));
}

#[test]
fn test_missing_url_is_usage_error() {
    Command::cargo_bin("miles")
        .unwrap()
        .args(["-f", "jpg"])
        .assert()
        .failure();
}
