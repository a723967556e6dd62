//! Integration tests for GraphQL report lookups against a mock server.

use std::time::Duration;

use report_results_net::graphql::{GraphQLClient, GraphQLRequest};
use report_results_net::{NetworkError, ReportClient, ReportConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY: &str = "query ReportResults($ReportNumber: String!) {\n  getReport(report_number: $ReportNumber) {\n    report_number\n    results { carat_weight color_grade }\n  }\n}\n";

fn report_body() -> serde_json::Value {
    json!({
        "data": {
            "getReport": {
                "report_number": "1206489210",
                "results": {"carat_weight": "1.01 carat", "color_grade": "E"},
                "links": [],
                "is_sleeve": false,
                "comments": null
            }
        }
    })
}

async fn mount(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn report_client(server: &MockServer) -> ReportClient {
    let config = ReportConfig::new(format!("{}/graphql", server.uri()), "test-api-key");
    ReportClient::new(&config, QUERY).expect("Failed to build client")
}

#[tokio::test]
async fn test_request_contract() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "test-api-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "query": QUERY,
            "variables": {"ReportNumber": "1206489210"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = report_client(&mock_server)
        .lookup("1206489210")
        .await
        .expect("Lookup failed");

    assert!(response.is_success());
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_successful_lookup_is_flattened() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, ResponseTemplate::new(200).set_body_json(report_body())).await;

    let response = report_client(&mock_server)
        .lookup("1206489210")
        .await
        .expect("Lookup failed");

    let entries: Vec<_> = response.flat().iter().collect();
    assert_eq!(
        entries,
        vec![
            ("/data/getReport/report_number", "1206489210"),
            ("/data/getReport/results/carat_weight", "1.01 carat"),
            ("/data/getReport/results/color_grade", "E"),
            ("/data/getReport/is_sleeve", "false"),
            ("/data/getReport/comments", "null"),
        ]
    );
    assert!(!response.has_graphql_errors());
    assert!(response.http_error().is_none());
    assert_eq!(response.document(), &report_body());
}

#[tokio::test]
async fn test_graphql_error_is_detected() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({
            "data": {"getReport": null},
            "errors": [{"message": "Report not found", "path": ["getReport"]}]
        })),
    )
    .await;

    let response = report_client(&mock_server)
        .lookup("0000000000")
        .await
        .expect("Lookup failed");

    assert!(response.is_http_success());
    assert_eq!(response.flat().get("/errors/0/message"), Some("Report not found"));
    assert_eq!(response.first_error_message(), Some("Report not found"));
    assert_eq!(response.flat().get("/data/getReport"), Some("null"));

    let envelope = response.envelope().expect("typed envelope");
    assert_eq!(envelope.errors.len(), 1);

    assert!(matches!(
        response.into_result(),
        Err(NetworkError::GraphQL { messages }) if messages == ["Report not found"]
    ));
}

#[tokio::test]
async fn test_every_graphql_error_is_detected() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({
            "errors": [
                {"message": "Variable \"$ReportNumber\" is required"},
                {"message": "Unknown field \"foo\""}
            ]
        })),
    )
    .await;

    let response = report_client(&mock_server).lookup("").await.expect("Lookup failed");

    assert_eq!(
        response.error_messages(),
        vec!["Variable \"$ReportNumber\" is required", "Unknown field \"foo\""]
    );
}

#[tokio::test]
async fn test_http_error_with_json_body_is_recoverable() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"message": "Forbidden: invalid API key"}]
        })),
    )
    .await;

    let response = report_client(&mock_server)
        .lookup("1206489210")
        .await
        .expect("JSON error bodies are returned");

    assert_eq!(response.status(), 403);
    assert!(!response.is_success());
    assert_eq!(response.first_error_message(), Some("Forbidden: invalid API key"));
    assert!(matches!(
        response.http_error(),
        Some(NetworkError::HttpStatus { status: 403, .. })
    ));
}

#[tokio::test]
async fn test_http_error_with_text_body() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(503).set_body_string("Service Unavailable"),
    )
    .await;

    let err = report_client(&mock_server)
        .lookup("1206489210")
        .await
        .expect_err("non-JSON error body");

    assert!(!err.is_transport());
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("{\"data\": {"),
    )
    .await;

    let err = report_client(&mock_server)
        .lookup("1206489210")
        .await
        .expect_err("truncated body");

    assert!(matches!(err, NetworkError::MalformedResponse { status: 200, .. }));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(report_body())
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let config = ReportConfig::new(format!("{}/graphql", mock_server.uri()), "key")
        .with_timeout(Duration::from_millis(100));
    let client = ReportClient::new(&config, QUERY).expect("Failed to build client");

    let err = client.lookup("1").await.expect_err("slow server");
    assert!(matches!(err, NetworkError::Timeout));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_bearer_auth_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer tok"))
        .and(header("x-client", "report-results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GraphQLClient::builder(mock_server.uri())
        .bearer_auth("tok")
        .header("X-Client", "report-results")
        .build()
        .expect("Failed to build client");

    let response = client
        .execute(&GraphQLRequest::new("{ ok }"))
        .await
        .expect("Request failed");
    assert_eq!(response.flat().get("/data/ok"), Some("true"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blocking_lookup() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, ResponseTemplate::new(200).set_body_json(report_body())).await;

    let client = report_client(&mock_server);
    let response = std::thread::spawn(move || client.lookup_blocking("1206489210"))
        .join()
        .expect("lookup thread")
        .expect("Lookup failed");

    assert_eq!(
        response.flat().get("/data/getReport/results/color_grade"),
        Some("E")
    );
    assert!(response.elapsed() > Duration::ZERO);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    let config = ReportConfig::new("http://127.0.0.1:9/graphql", "key");
    let client = ReportClient::new(&config, QUERY).expect("Failed to build client");

    let err = client.lookup("1").await.expect_err("nothing listens on port 9");
    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert_eq!(err.status(), None);
}
