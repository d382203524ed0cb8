use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn filedeck() -> Command {
    let mut cmd = Command::cargo_bin("filedeck").unwrap();
    cmd.env_remove("FILEDECK_BACKEND_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    filedeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("export-html"));
}

#[test]
fn rejects_non_http_backend_url() {
    filedeck()
        .args(["--backend-url", "ftp://files.example.com", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("http:// and https://"));
}

#[test]
fn generate_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("filedeck.toml");

    filedeck()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("base_url"));
}

#[test]
fn unreachable_backend_exits_with_network_code() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    filedeck()
        .args(["--backend-url", &format!("http://127.0.0.1:{port}"), "list"])
        .assert()
        .code(5);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_prints_plain_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json_files": ["9.json"],
            "xml_files": []
        })))
        .mount(&server)
        .await;

    let expected = format!("9.json\t{}/files/json/9.json", server.uri());
    filedeck()
        .args(["--backend-url", &server.uri(), "--output-format", "plain", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected))
        .stdout(predicate::str::contains("XML FILES: 0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_error_exits_with_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&server)
        .await;

    filedeck()
        .args(["--backend-url", &server.uri(), "extract"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("boom"));
}
