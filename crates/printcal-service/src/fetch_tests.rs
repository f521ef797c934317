//! Tests for calendar fetching.

use printcal_core::config::FetchConfig;
use reqwest::Client;

use crate::error::FetchError;
use crate::fetch::{build_client, fetch_calendar, parse_target, proxied_url};
use crate::upstream::{FakeUpstream, unreachable_url};

const FEED: &str = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";

fn client() -> Client {
    build_client(&FetchConfig {
        timeout_secs: 5,
        proxy_url: None,
    })
    .unwrap()
}

#[test]
fn parse_target_accepts_http_and_webcal() {
    assert_eq!(
        parse_target("webcal://school.example/cal.ics").unwrap().as_str(),
        "https://school.example/cal.ics"
    );
    assert_eq!(
        parse_target(" http://school.example/cal.ics ").unwrap().scheme(),
        "http"
    );
}

#[test]
fn parse_target_rejects_other_input() {
    for url in ["not a url", "ftp://school.example/cal.ics", "file:///etc/passwd"] {
        assert!(
            matches!(parse_target(url), Err(FetchError::InvalidUrl(_))),
            "{url}"
        );
    }
}

#[test]
fn proxied_url_encodes_target() {
    let target = parse_target("https://school.example/cal.ics?term=fall").unwrap();
    let url = proxied_url("https://proxy.example/fetch", &target).unwrap();
    assert_eq!(
        url.as_str(),
        "https://proxy.example/fetch?url=https%3A%2F%2Fschool.example%2Fcal.ics%3Fterm%3Dfall"
    );
}

#[test_log::test(tokio::test)]
async fn fetch_returns_body() {
    let upstream = FakeUpstream::start(vec![(200, FEED)]).await.unwrap();

    let body = fetch_calendar(&client(), &upstream.url("/cal.ics"), None)
        .await
        .unwrap();
    assert_eq!(body, FEED);
    assert_eq!(upstream.requests(), vec!["GET /cal.ics"]);
}

#[test_log::test(tokio::test)]
async fn fetch_falls_back_to_proxy() {
    let upstream = FakeUpstream::start(vec![(503, "busy"), (200, FEED)])
        .await
        .unwrap();
    let proxy = upstream.url("/proxy");

    let body = fetch_calendar(&client(), &upstream.url("/cal.ics"), Some(&proxy))
        .await
        .unwrap();
    assert_eq!(body, FEED);

    let seen = upstream.requests();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], "GET /cal.ics");
    assert!(seen[1].starts_with("GET /proxy?url=http%3A%2F%2F127.0.0.1"), "{}", seen[1]);
}

#[tokio::test]
async fn fetch_reports_status_without_proxy() {
    let upstream = FakeUpstream::start(vec![(404, "missing")]).await.unwrap();

    let err = fetch_calendar(&client(), &upstream.url("/cal.ics"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(upstream.requests().len(), 1);
}

#[tokio::test]
async fn fetch_reports_transport_error() {
    let url = unreachable_url("/cal.ics").unwrap();

    let err = fetch_calendar(&client(), &url, None).await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}
