use std::time::Duration;

use offer_search_core::{FilterSet, JobType, OfferId};
use offer_search_engine::{FailureKind, FetchSettings, OfferFetcher, ReqwestOfferFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        api_host: server.uri(),
        ..FetchSettings::default()
    }
}

/// Host on a local port that nothing listens on.
fn closed_local_host() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn offers_body(ids: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(
        ids.iter()
            .map(|id| {
                serde_json::json!({
                    "_id": id,
                    "title": format!("Offer {id}"),
                    "publishDate": "2026-01-01T00:00:00Z",
                    "publishEndDate": "2026-12-31T00:00:00Z",
                    "ownerName": "Ferris Lda",
                    "location": "Porto",
                })
            })
            .collect(),
    )
}

#[tokio::test]
async fn fetcher_sends_filters_and_decodes_offers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .and(query_param("value", "rust"))
        .and(query_param("jobType", "FULL-TIME"))
        .and(query_param("offset", "5"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_body(&["a", "b"])))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestOfferFetcher::new(settings_for(&server)).expect("client");
    let filters = FilterSet::new("rust").with_job_type(JobType::FullTime);

    let offers = fetcher.fetch(&filters, 5).await.expect("fetch ok");

    let ids: Vec<_> = offers.iter().map(|offer| offer.id.clone()).collect();
    assert_eq!(ids, vec![OfferId::new("a"), OfferId::new("b")]);
    assert_eq!(offers[0].company.name.as_deref(), Some("Ferris Lda"));
}

#[tokio::test]
async fn fetcher_reports_bad_response_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error_code": 1,
            "errors": [{ "msg": "unexpected-error" }],
        })))
        .mount(&server)
        .await;

    let fetcher = ReqwestOfferFetcher::new(settings_for(&server)).expect("client");

    let err = fetcher.fetch(&FilterSet::default(), 5).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::BadResponse(500));
}

#[tokio::test]
async fn fetcher_reports_malformed_body_as_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let fetcher = ReqwestOfferFetcher::new(settings_for(&server)).expect("client");

    let err = fetcher.fetch(&FilterSet::default(), 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unexpected);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offers_body(&["a", "b", "c"])))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..settings_for(&server)
    };
    let fetcher = ReqwestOfferFetcher::new(settings).expect("client");

    let err = fetcher.fetch(&FilterSet::default(), 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unexpected);
    assert!(err.message.contains("too large"), "{}", err.message);
}

#[tokio::test]
async fn fetcher_reports_network_failure_on_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(offers_body(&[])),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let fetcher = ReqwestOfferFetcher::new(settings).expect("client");

    let err = fetcher.fetch(&FilterSet::default(), 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::NetworkFailure);
}

#[tokio::test]
async fn fetcher_reports_network_failure_when_unreachable() {
    let settings = FetchSettings {
        api_host: closed_local_host(),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestOfferFetcher::new(settings).expect("client");

    let err = fetcher.fetch(&FilterSet::default(), 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::NetworkFailure);
}

#[tokio::test]
async fn fetcher_rejects_invalid_api_host() {
    let settings = FetchSettings {
        api_host: "not a url".to_string(),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestOfferFetcher::new(settings).expect("client");

    let err = fetcher.fetch(&FilterSet::default(), 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unexpected);
}
