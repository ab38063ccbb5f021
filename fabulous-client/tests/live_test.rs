//! Read-only checks against the real registrar API.
//!
//! Run with:
//! ```bash
//! FABULOUS_USERNAME=xxx FABULOUS_PASSWORD=xxx TEST_DOMAIN=example.com \
//!     cargo test -p fabulous-client --test live_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use fabulous_client::FabulousClient;

fn live_client() -> FabulousClient {
    FabulousClient::from_env().expect("client from environment")
}

#[tokio::test]
#[ignore]
async fn live_list_first_page() {
    skip_if_no_credentials!("FABULOUS_USERNAME", "FABULOUS_PASSWORD");

    let result = live_client().domains().list_page(1).await;
    assert!(result.is_ok(), "list_page failed: {result:?}");
    println!("list_page(1): {} domains", result.unwrap_or_default().len());
}

#[tokio::test]
#[ignore]
async fn live_domain_info() {
    skip_if_no_credentials!("FABULOUS_USERNAME", "FABULOUS_PASSWORD", "TEST_DOMAIN");

    let domain = std::env::var("TEST_DOMAIN").unwrap_or_default();
    let info = live_client().domains().info(&domain).await;
    assert!(info.is_ok(), "info failed: {info:?}");
    let info = info.unwrap_or_default();
    assert!(info.is_some(), "no domain info for {domain}");
    println!("{domain}: {info:?}");
}

#[tokio::test]
#[ignore]
async fn live_dns_records() {
    skip_if_no_credentials!("FABULOUS_USERNAME", "FABULOUS_PASSWORD", "TEST_DOMAIN");

    let domain = std::env::var("TEST_DOMAIN").unwrap_or_default();
    let records = live_client().dns().list_records(&domain, None).await;
    assert!(records.is_ok(), "list_records failed: {records:?}");
    println!("{domain}: {} records", records.unwrap_or_default().len());
}
