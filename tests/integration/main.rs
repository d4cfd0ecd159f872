//! Integration tests for Simplyfi
//!
//! These tests drive the real router over HTTP and the built binary.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{json, Value};
use simplyfi_ai::{ExplainConfig, Explainer};
use simplyfi_server::{ServerConfig, ServerState, SimplyfiServer};

/// Start a server with the offline explainer on a free port.
async fn spawn_server() -> String {
    let explainer = Explainer::from_config(&ExplainConfig::local()).unwrap();
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0, // Let OS assign port
    };

    let server = SimplyfiServer::new(ServerState::new(explainer), config);
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server.serve(listener).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn post(base: &str, path: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}{}", base, path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_health_and_languages() {
    let base = spawn_server().await;

    let health: Value = reqwest::get(format!("{}/api/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let languages: Vec<String> = reqwest::get(format!("{}/api/languages", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(languages, vec!["Python", "JavaScript", "Java", "C++", "C#"]);
}

#[tokio::test]
async fn test_flowchart_endpoint() {
    let base = spawn_server().await;
    let (status, body) = post(
        &base,
        "/api/flowchart",
        json!({"code": "# step one\ndef foo():\n    pass\n# step two", "language": "Python"}),
    )
    .await;

    assert_eq!(status, 200);
    let labels: Vec<&str> = body["graph"]["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Start", "step one", "foo", "step two", "End"]);
    assert_eq!(body["graph"]["edges"].as_array().unwrap().len(), 4);
    assert!(body["dot"].as_str().unwrap().contains("parallelogram"));
}

#[tokio::test]
async fn test_flowchart_rejects_blank_code() {
    let base = spawn_server().await;
    let (status, body) = post(&base, "/api/flowchart", json!({"code": "  \n"})).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "blank_code");
}

#[tokio::test]
async fn test_syntax_tree_endpoint() {
    let base = spawn_server().await;

    let (status, body) = post(&base, "/api/syntax-tree", json!({"code": "x = 1"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["graph"]["nodes"][0]["label"], "module");

    let (status, body) = post(&base, "/api/syntax-tree", json!({"code": "def f(:"})).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "invalid_syntax");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_server_survives_failed_request() {
    let base = spawn_server().await;

    let (status, _) = post(&base, "/api/syntax-tree", json!({"code": "class (:"})).await;
    assert_eq!(status, 422);

    // the next request is served normally
    let (status, _) = post(&base, "/api/syntax-tree", json!({"code": "y = 2"})).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_explain_endpoint() {
    let base = spawn_server().await;
    let (status, body) = post(
        &base,
        "/api/explain",
        json!({"code": "def main():\n    run()\n", "instruction": "Be brief"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["provider"], "Local (Heuristic)");
    assert!(body["explanation"].as_str().unwrap().contains("main"));
}

#[tokio::test]
async fn test_highlight_endpoint() {
    let base = spawn_server().await;
    let (status, body) = post(
        &base,
        "/api/highlight",
        json!({"code": "int main() { return 0; }", "language": "C++"}),
    )
    .await;

    assert_eq!(status, 200);
    assert!(body["html"].as_str().unwrap().starts_with("<pre"));
}

#[tokio::test]
async fn test_index_page_served() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{}/", base)).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(response.text().await.unwrap().contains("Simplyfi"));
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_simplyfi"))
        .arg("version")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Simplyfi v"));
}

#[test]
fn test_cli_flowchart_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_simplyfi"))
        .args(["flowchart", "--format", "chain", "--language", "java"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"// entry\nvoid run() {\n}\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Start\nentry\nrun\nEnd\n");
}

#[test]
fn test_cli_syntax_tree_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.py");
    std::fs::write(&path, "def f(:\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_simplyfi"))
        .arg("syntax-tree")
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
}
