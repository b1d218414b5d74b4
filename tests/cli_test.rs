/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary against a wiremock backend and verify
/// command-line behavior
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{EntryBuilder, layers_body, stats_body, timeline_body};
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli(api_url: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_timeline-explorer"));
    cmd.env("TIMELINE_LOG", "off").arg("--api-url").arg(api_url);
    cmd
}

/// Run the binary on a blocking thread while the mock server keeps serving
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap()).await.unwrap();
    output.assert()
}

async fn timeline_server() -> MockServer {
    let server = MockServer::start().await;
    let entries = [
        EntryBuilder::new("B post")
            .with_path("/outputs/posts/222_B.md")
            .with_date("2021-05-01")
            .with_layers(&["observability"]),
        EntryBuilder::new("A post")
            .with_path("/outputs/posts/111_A.md")
            .with_date("2019-01-01")
            .with_layers(&["data-infrastructure"])
            .with_snippet("How we moved the pipeline"),
        EntryBuilder::new("C post").with_path("/outputs/posts/333_C.md"),
    ];
    Mock::given(method("GET"))
        .and(path("/timeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_body(&entries)))
        .mount(&server)
        .await;
    server
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_timeline-explorer"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Browse the engineering blog timeline"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_timeline-explorer"));
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("timeline-explorer"));
}

#[test]
fn test_cli_rejects_invalid_api_url() {
    cli("ftp://example.com")
        .arg("layers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("http"));
}

#[test]
fn test_cli_unreachable_backend_fails() {
    cli("http://127.0.0.1:9")
        .args(["list", "--sort", "oldest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load posts"));
}

#[test]
fn test_cli_rejects_inverted_year_range() {
    cli("http://127.0.0.1:9")
        .args(["list", "--from", "2022", "--to", "2020"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[tokio::test]
async fn test_cli_list_text_output() {
    let server = timeline_server().await;

    let mut cmd = cli(&server.uri());
    cmd.arg("list");
    run(cmd).await.success().stdout(predicate::eq(
        "2021-05-01 | B post | observability\n\
         2019-01-01 | A post | data-infrastructure\n\
         N/A | C post | \n",
    ));
}

#[tokio::test]
async fn test_cli_list_range_sort_and_limit() {
    let server = timeline_server().await;

    let mut cmd = cli(&server.uri());
    cmd.args(["list", "--from", "2019", "--sort", "title-asc", "--limit", "1"]);
    run(cmd).await.success().stdout(predicate::eq("2019-01-01 | A post | data-infrastructure\n"));
}

#[tokio::test]
async fn test_cli_list_json_output() {
    let server = timeline_server().await;

    let mut cmd = cli(&server.uri());
    cmd.args(["list", "--json"]);
    let output = run(cmd).await.success().get_output().stdout.clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["title"], "B post");
    assert_eq!(items[2]["date"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_cli_list_search_uses_search_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "kafka"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [EntryBuilder::new("Kafka at scale").with_date("2020-01-01").to_json()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = cli(&server.uri());
    cmd.args(["list", "--search", "kafka"]);
    run(cmd).await.success().stdout(predicate::str::contains("Kafka at scale"));
}

#[tokio::test]
async fn test_cli_list_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_body(&[])))
        .mount(&server)
        .await;

    let mut cmd = cli(&server.uri());
    cmd.arg("list");
    run(cmd).await.success().stdout(predicate::str::contains("No posts found"));
}

#[tokio::test]
async fn test_cli_layers_resolves_display_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/layers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(layers_body()))
        .mount(&server)
        .await;

    let mut cmd = cli(&server.uri());
    cmd.arg("layers");
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Observability"))
        .stdout(predicate::str::contains("Data Infrastructure"))
        .stdout(predicate::str::contains("2012-01-15 - 2025-01-02"));
}

#[tokio::test]
async fn test_cli_stats_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&server)
        .await;

    let mut cmd = cli(&server.uri());
    cmd.arg("stats");
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Total posts: 42"))
        .stdout(predicate::str::contains("Timeline span: 13 years"))
        .stdout(predicate::str::contains("Avg layers per post: 1.3"))
        .stdout(predicate::str::contains("  2021 20"));
}

#[tokio::test]
async fn test_cli_stats_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut cmd = cli(&server.uri());
    cmd.arg("stats");
    run(cmd)
        .await
        .failure()
        .stderr(predicate::str::contains("Failed to load statistics"))
        .stderr(predicate::str::contains("503"));
}

#[tokio::test]
async fn test_cli_show_entry() {
    let server = timeline_server().await;

    let mut cmd = cli(&server.uri());
    cmd.args(["show", "/outputs/posts/111_A.md"]);
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("January 1, 2019"))
        .stdout(predicate::str::contains("How we moved the pipeline"))
        .stdout(predicate::str::contains("https://netflixtechblog.medium.com/a-post-111"));
}

#[tokio::test]
async fn test_cli_show_missing_entry() {
    let server = timeline_server().await;

    let mut cmd = cli(&server.uri());
    cmd.args(["show", "/outputs/posts/999_missing.md"]);
    run(cmd).await.failure().stderr(predicate::str::contains("No post with path"));
}
