//! End-to-end tests of the `uddr` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A command isolated from the caller's environment and config file.
fn uddr(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("uddr").unwrap();
    cmd.env("UDDR_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("UDDR_API_KEY")
        .env_remove("UDDR_CLIENT_ID")
        .env_remove("DEFAULT_ORG_NAME")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("aggregates"))
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("normalize"));
}

#[test]
fn normalize_prints_query_names() {
    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .args([
            "normalize",
            "192.0.2.1",
            "evil[.]example.com",
            "hxxps://bad.example.com/path?x=1",
            "user@example.com",
        ])
        .assert()
        .success()
        .stdout(
            "1.2.0.192.in-addr.arpa\nevil.example.com\nbad.example.com\nexample.com\n",
        );
}

#[test]
fn normalize_rejects_invalid_indicator() {
    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .args(["normalize", "example.com", "not a host"])
        .assert()
        .failure()
        .stdout("example.com\n")
        .stderr(predicate::str::contains("'not a host' is not a valid IP address or hostname"));
}

#[test]
fn invalid_query_type_lists_accepted_values() {
    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .args(["--api-key", "k", "aggregates", "FOO"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "aggregates: query_type 'FOO' must be one of DOMAIN, FQDN, COUNTRY, TLD, REGISTRAR",
        ));
}

#[test]
fn missing_api_key_explains_how_to_set_it() {
    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .args(["summary", "TOTAL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key required"))
        .stderr(predicate::str::contains("uddr config set api_key"));
}

#[test]
fn invalid_filters_json_fails() {
    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .args(["-k", "k", "logs", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("filters must be valid JSON"));
}

#[test]
fn config_set_show_and_path() {
    let dir = TempDir::new().unwrap();

    uddr(&dir)
        .args(["config", "set", "api_key", "0123456789abcdef"])
        .assert()
        .success();
    uddr(&dir)
        .args(["config", "set", "output_format", "csv"])
        .assert()
        .success();

    uddr(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0123...cdef"))
        .stdout(predicate::str::contains("csv"))
        .stdout(predicate::str::contains("0123456789abcdef").not());

    uddr(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    uddr(&dir)
        .args(["config", "set", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[tokio::test]
async fn aggregates_as_csv_against_mock_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/aggregates"))
        .and(header("X-API-Key", "k"))
        .and(body_json(json!({
            "applied_filters": { "query_type": "tld", "top_count": 2 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "top_items": [
                { "key": "com", "count": 10 },
                { "key": "net", "count": 4 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .env("UDDR_API_URL", server.uri())
        .args(["-k", "k", "-o", "csv", "aggregates", "tld", "--top-count", "2"])
        .assert()
        .success()
        .stdout(",key,count\n0,com,10\n1,net,4\n");
}

#[tokio::test]
async fn lookup_with_client_id_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": 3
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    uddr(&dir)
        .env("UDDR_DOH_URL", server.uri())
        .args(["--client-id", "abc123", "lookup", "nothing[.]example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"indicator\": \"nothing.example.com\""))
        .stdout(predicate::str::contains("NXDOMAIN"))
        .stdout(predicate::str::contains("Block page is not enabled"));
}
