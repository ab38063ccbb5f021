//! Pagination driver behaviour against a scripted transport.

mod common;

use std::ops::ControlFlow;

use common::{ScriptedTransport, client_with, xml_response};
use fabulous_client::{Params, RegistrarError};
use futures::{StreamExt, TryStreamExt};

fn counter_page(page: u32, pagecount: u32, name: &str) -> String {
    xml_response(
        200,
        "Success",
        &format!(
            "<domains><domain><name>{name}</name></domain></domains>\
             <pagecount>{pagecount}</pagecount><page>{page}</page>"
        ),
    )
}

fn result_page(count: u32, names: &[&str]) -> String {
    let rows: String = names
        .iter()
        .map(|n| format!("<result><domain>{n}</domain><exdate>2030-01-01</exdate></result>"))
        .collect();
    xml_response(200, "Success", &format!("<results count=\"{count}\">{rows}</results>"))
}

#[tokio::test]
async fn collect_walks_two_pages_with_exactly_two_requests() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(1, 2, "domain1.com"))
        .reply(counter_page(2, 2, "domain2.com"));
    let client = client_with(transport.clone());

    let domains = client.domains().all().await.unwrap();

    let names: Vec<_> = domains.iter().filter_map(|d| d.name.as_deref()).collect();
    assert_eq!(names, ["domain1.com", "domain2.com"]);
    assert_eq!(transport.call_count(), 2);

    let calls = transport.calls();
    assert!(calls.iter().all(|c| c.action == "listDomains"));
    assert_eq!(calls[0].param("page").as_deref(), Some("1"));
    assert_eq!(calls[1].param("page").as_deref(), Some("2"));
}

#[tokio::test]
async fn single_page_reply_stops_immediately() {
    let transport = ScriptedTransport::new().reply(xml_response(
        200,
        "Success",
        "<domains><domain><name>only.com</name></domain></domains>",
    ));
    let client = client_with(transport.clone());

    let domains = client.domains().all().await.unwrap();
    assert_eq!(domains.len(), 1);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn error_mid_run_discards_collected_items() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(1, 3, "a.com"))
        .reply(xml_response(503, "Maintenance", ""))
        .reply(counter_page(3, 3, "c.com"));
    let client = client_with(transport.clone());

    let err = client.domains().all().await.unwrap_err();
    assert!(
        matches!(err, RegistrarError::Response { code: 503, .. }),
        "got {err:?}"
    );
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn transport_failure_aborts_the_run() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(1, 2, "a.com"))
        .fail(RegistrarError::Timeout {
            detail: "operation timed out".into(),
        });
    let client = client_with(transport);

    let err = client.domains().all().await.unwrap_err();
    assert!(matches!(err, RegistrarError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn result_count_walk_ends_on_empty_page() {
    let transport = ScriptedTransport::new()
        .reply(result_page(3, &["a.com", "b.com"]))
        .reply(result_page(3, &["c.com"]))
        .reply(result_page(3, &[]));
    let client = client_with(transport.clone());

    let domains = client.domains().all().await.unwrap();
    assert_eq!(domains.len(), 3);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn streaming_mode_hands_over_each_page() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(1, 3, "a.com"))
        .reply(counter_page(2, 3, "b.com"))
        .reply(counter_page(3, 3, "c.com"));
    let client = client_with(transport.clone());

    let mut seen = Vec::new();
    client
        .domains()
        .for_each_page(|response, page| {
            seen.push((page, response.domains().len()));
            ControlFlow::Continue(())
        })
        .await
        .unwrap();

    assert_eq!(seen, [(1_u32, 1_usize), (2, 1), (3, 1)]);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn streaming_mode_can_stop_between_pages() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(1, 5, "a.com"))
        .reply(counter_page(2, 5, "b.com"));
    let client = client_with(transport.clone());

    let mut pages = 0;
    client
        .domains()
        .for_each_page(|_, _| {
            pages += 1;
            ControlFlow::Break(())
        })
        .await
        .unwrap();

    assert_eq!(pages, 1);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn base_params_and_start_page_are_sent() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(4, 5, "d.com"))
        .reply(counter_page(5, 5, "e.com"));
    let client = client_with(transport.clone());

    let names = client
        .paginate("listDomains", Params::new().with("filter", "shop"))
        .start_page(4)
        .collect(|r| {
            r.domains()
                .iter()
                .filter_map(|d| d.name.clone())
                .collect()
        })
        .await
        .unwrap();

    assert_eq!(names, ["d.com", "e.com"]);
    let calls = transport.calls();
    assert_eq!(calls[0].param("filter").as_deref(), Some("shop"));
    assert_eq!(calls[0].param("page").as_deref(), Some("4"));
    assert_eq!(calls[1].param("page").as_deref(), Some("5"));
}

#[tokio::test]
async fn stream_yields_pages_lazily() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(1, 2, "a.com"))
        .reply(counter_page(2, 2, "b.com"));
    let client = client_with(transport.clone());
    let paginator = client.paginate("listDomains", Params::new());

    let stream = paginator.stream();
    futures::pin_mut!(stream);

    let first = stream.try_next().await.unwrap().unwrap();
    assert_eq!(first.number, 1);
    assert_eq!(transport.call_count(), 1);

    let second = stream.try_next().await.unwrap().unwrap();
    assert_eq!(second.number, 2);
    assert!(stream.try_next().await.unwrap().is_none());
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn stream_ends_after_an_error() {
    let transport = ScriptedTransport::new()
        .reply(counter_page(1, 3, "a.com"))
        .reply(xml_response(301, "Bad credentials", ""));
    let client = client_with(transport.clone());
    let paginator = client.paginate("listDomains", Params::new());

    let pages: Vec<_> = paginator.stream().collect::<Vec<_>>().await;
    assert_eq!(pages.len(), 2);
    assert!(pages[0].is_ok());
    assert!(matches!(
        pages[1],
        Err(RegistrarError::Authentication { code: 301, .. })
    ));
    assert_eq!(transport.call_count(), 2);
}
