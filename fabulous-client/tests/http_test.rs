//! End-to-end requests through the HTTP transport against a mock server.

mod common;

use std::time::Duration;

use common::xml_response;
use fabulous_client::{ClientConfig, FabulousClient, RegistrarError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> FabulousClient {
    FabulousClient::new(ClientConfig::new("test_user", "test_pass").with_base_url(server.uri()))
        .unwrap()
}

#[tokio::test]
async fn check_domain_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkDomain"))
        .and(query_param("username", "test_user"))
        .and(query_param("password", "test_pass"))
        .and(query_param("domain", "available.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_response(
            200,
            "Success",
            "<availability>true</availability>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let available = client(&server)
        .domains()
        .check("available.com")
        .await
        .unwrap();
    assert_eq!(available, Some(true));
}

#[tokio::test]
async fn paginated_listing_over_http() {
    let server = MockServer::start().await;
    for (page, name) in [("1", "domain1.com"), ("2", "domain2.com")] {
        Mock::given(method("GET"))
            .and(path("/listDomains"))
            .and(query_param("page", page))
            .respond_with(ResponseTemplate::new(200).set_body_string(xml_response(
                200,
                "Success",
                &format!(
                    "<domains><domain><name>{name}</name></domain></domains><pagecount>2</pagecount><page>{page}</page>"
                ),
            )))
            .expect(1)
            .mount(&server)
            .await;
    }

    let domains = client(&server).domains().all().await.unwrap();
    let names: Vec<_> = domains.iter().filter_map(|d| d.name.as_deref()).collect();
    assert_eq!(names, ["domain1.com", "domain2.com"]);
}

#[tokio::test]
async fn registrar_error_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lockDomain"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(xml_response(302, "Session expired", "")),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .domains()
        .lock("example.com")
        .await
        .unwrap_err();
    assert!(
        matches!(err, RegistrarError::Authentication { code: 302, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn timeout_wins_over_any_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(xml_response(200, "Success", ""))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new("test_user", "test_pass")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let err = FabulousClient::new(config)
        .unwrap()
        .domains()
        .unlock("example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrarError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let config = ClientConfig::new("test_user", "test_pass")
        .with_base_url("http://127.0.0.1:9")
        .with_connect_timeout(Duration::from_secs(2));
    let err = FabulousClient::new(config)
        .unwrap()
        .domains()
        .check("example.com")
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            RegistrarError::Request { code: None, .. } | RegistrarError::Timeout { .. }
        ),
        "got {err:?}"
    );
}
