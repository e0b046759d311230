//! End-to-end tests for the dvapi binary
//!
//! These tests run the compiled binary against a wiremock Dataverse and
//! check:
//! - Output of successful commands
//! - Exit status and messages on failure
//! - Configuration errors

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::PathBuf;
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const PERSISTENT_ID: &str = "doi:10.5072/FK2/TEST01";

/// Path to a JSON fixture under tests/data
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Helper to start a mock server that passes the connection probe
async fn dataverse_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/info/server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": {"message": "mock.dataverse.test"}
        })))
        .mount(&server)
        .await;

    server
}

/// Parsed JSON fixture
fn fixture_json(name: &str) -> Value {
    serde_json::from_str(&std::fs::read_to_string(fixture(name)).unwrap()).unwrap()
}

/// The binary with connection settings taken only from the arguments
///
/// Runs in the test scratch directory so no stray `.env` file is picked up.
fn dvapi() -> Command {
    let mut cmd = Command::cargo_bin("dvapi").unwrap();
    cmd.current_dir(env!("CARGO_TARGET_TMPDIR"));
    for var in [
        "BASE_URL",
        "API_TOKEN",
        "DATAVERSE_BASE_URL",
        "DATAVERSE_API_TOKEN",
        "DATAVERSE_API_VERSION",
        "DATAVERSE_TOKEN_HEADER",
        "RUST_LOG",
        "LOG_LEVEL",
        "LOG_OUTPUT",
        "LOG_FORMAT",
        "LOG_FILTER",
        "CLICOLOR_FORCE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// `dvapi` pointed at `server` through `--base-url`
fn dvapi_at(server: &MockServer) -> Command {
    let mut cmd = dvapi();
    cmd.arg("--base-url").arg(server.uri());
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_info_server() {
    let server = dataverse_server().await;

    dvapi()
        .arg("--base-url")
        .arg(server.uri())
        .arg("info")
        .arg("server")
        .assert()
        .success()
        .stdout(predicate::str::contains("mock.dataverse.test"))
        .stderr(predicate::str::contains("HTTP 200"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_base_url_from_env() {
    let server = dataverse_server().await;

    dvapi()
        .env("BASE_URL", server.uri())
        .args(["request", "get", "/info/server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mock.dataverse.test"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prefixed_env_wins_over_plain_env() {
    let server = dataverse_server().await;

    dvapi()
        .env("DATAVERSE_BASE_URL", server.uri())
        .env("BASE_URL", "http://127.0.0.1:9")
        .args(["info", "server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mock.dataverse.test"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flags_override_env() {
    let server = dataverse_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/dataverses/root"))
        .and(header("Authorization", "Bearer flag-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    dvapi_at(&server)
        .env("DATAVERSE_BASE_URL", "http://127.0.0.1:9")
        .env("DATAVERSE_API_TOKEN", "env-token")
        .args(["--api-token", "flag-token", "dataverse", "get", "root"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dotenv_in_working_dir_is_read() {
    let server = dataverse_server().await;
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), format!("BASE_URL={}\n", server.uri())).unwrap();

    dvapi()
        .current_dir(dir.path())
        .args(["info", "server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mock.dataverse.test"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dotenv_in_parent_dir_is_ignored() {
    let server = dataverse_server().await;
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), format!("BASE_URL={}\n", server.uri())).unwrap();
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();

    dvapi()
        .current_dir(&nested)
        .args(["info", "server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verbose_logs_are_plain_when_piped() {
    let server = dataverse_server().await;

    dvapi_at(&server)
        .args(["--verbose", "info", "server"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Connected to Dataverse"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_info_version_and_terms() {
    let server = dataverse_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/info/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": {"version": "6.2", "build": "1234"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/info/apiTermsOfUse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": {"message": "No terms"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    dvapi_at(&server)
        .args(["info", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6.2"));

    dvapi_at(&server)
        .args(["info", "terms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No terms"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_metadatablock_list_and_get() {
    let server = dataverse_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/metadatablocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": [{"name": "citation"}, {"name": "geospatial"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/metadatablocks/citation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": {"name": "citation", "displayName": "Citation Metadata"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    dvapi_at(&server)
        .args(["metadatablock", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("geospatial"));

    dvapi_at(&server)
        .args(["metadatablock", "get", "citation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Citation Metadata"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_request_post_sends_body_file() {
    let server = dataverse_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/dataverses/:root"))
        .and(body_json(fixture_json("create_dataverse.json")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "OK",
            "data": {"alias": "test-dvapi-3"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    dvapi_at(&server)
        .args(["request", "post", "/dataverses/:root", "--body"])
        .arg(fixture("create_dataverse.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("test-dvapi-3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_request_post_missing_body_file() {
    let server = dataverse_server().await;

    dvapi_at(&server)
        .args(["request", "post", "/dataverses/:root", "--body", "/no/such/body.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/body.json"));

    let posts = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method == wiremock::http::Method::POST)
        .count();
    assert_eq!(posts, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_request_delete() {
    let server = dataverse_server().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/dataverses/test-dvapi-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": {"message": "Dataverse 3 deleted"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    dvapi_at(&server)
        .args(["request", "delete", "/dataverses/test-dvapi-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dataset_publish_export_and_files() {
    let server = dataverse_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/:persistentId/actions/:publish"))
        .and(query_param("persistentId", PERSISTENT_ID))
        .and(query_param("type", "major"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/export"))
        .and(query_param("exporter", "oai_dc"))
        .and(query_param("persistentId", PERSISTENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_string("<oai_dc:dc/>"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/:persistentId/versions/:draft/files"))
        .and(query_param("persistentId", PERSISTENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": [{"label": "data.csv"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    dvapi_at(&server)
        .args(["dataset", "publish", PERSISTENT_ID, "--release", "major"])
        .assert()
        .success();

    dvapi_at(&server)
        .args(["dataset", "export", PERSISTENT_ID, "--exporter", "oai_dc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<oai_dc:dc/>"));

    dvapi_at(&server)
        .args(["dataset", "files", PERSISTENT_ID, ":draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data.csv"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dataset_upload() {
    let server = dataverse_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/:persistentId/add"))
        .and(query_param("persistentId", PERSISTENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("data.csv");
    std::fs::write(&file, "a,b\n1,2\n").unwrap();

    dvapi_at(&server)
        .args(["--api-token", "token", "dataset", "upload", PERSISTENT_ID])
        .arg(&file)
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_raw_output_is_unformatted() {
    let server = dataverse_server().await;

    dvapi()
        .arg("--base-url")
        .arg(server.uri())
        .args(["--raw", "info", "server"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status":"OK""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_dataverse_fails() {
    let server = dataverse_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/dataverses/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "ERROR",
            "message": "Can't find dataverse with identifier='nope'"
        })))
        .mount(&server)
        .await;

    dvapi()
        .arg("--base-url")
        .arg(server.uri())
        .args(["dataverse", "get", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Can't find dataverse"))
        .stderr(predicate::str::contains("HTTP 404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dataset_create_prints_persistent_id() {
    let server = dataverse_server().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/dataverses/test-dvapi-3/datasets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "OK",
            "data": {"id": 7, "persistentId": PERSISTENT_ID}
        })))
        .expect(1)
        .mount(&server)
        .await;

    dvapi()
        .arg("--base-url")
        .arg(server.uri())
        .args(["--api-token", "token"])
        .args(["dataset", "create", "test-dvapi-3"])
        .arg(fixture("create_dataset.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains(PERSISTENT_ID));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dataset_delete() {
    let server = dataverse_server().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/datasets/:persistentId/"))
        .and(query_param("persistentId", PERSISTENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    dvapi()
        .arg("--base-url")
        .arg(server.uri())
        .args(["dataset", "delete", PERSISTENT_ID])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_datafile_written_to_output() {
    let server = dataverse_server().await;

    Mock::given(method("GET"))
        .and(path("/api/access/datafile/42"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"col\n1\n".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("file.tab");

    dvapi()
        .arg("--base-url")
        .arg(server.uri())
        .args(["datafile", "42", "--output"])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(std::fs::read(&out).unwrap(), b"col\n1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_incompatible_host_fails() {
    let server = MockServer::start().await;

    dvapi()
        .arg("--base-url")
        .arg(server.uri())
        .args(["info", "server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not answer like a Dataverse API"));
}

#[test]
fn test_missing_base_url_fails() {
    dvapi()
        .args(["info", "server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_invalid_base_url_fails() {
    dvapi()
        .args(["--base-url", "not-a-url", "info", "server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}
