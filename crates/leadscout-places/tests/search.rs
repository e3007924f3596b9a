//! Integration tests for the search orchestrator against a mock provider.

use std::time::Duration;

use leadscout_places::{search_leads, PlacesClient, SearchBias, SearchError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    let bias = SearchBias {
        latitude: 7.8731,
        longitude: 80.7718,
        radius_m: 150_000,
    };
    PlacesClient::with_base_url("test-key", 30, bias, base_url)
        .expect("client construction should not fail")
}

fn summaries(place_ids: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "results": place_ids
            .iter()
            .map(|id| serde_json::json!({ "place_id": id }))
            .collect::<Vec<_>>()
    })
}

/// A details body that passes every qualification predicate.
fn qualifying_detail(place_id: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "result": {
            "place_id": place_id,
            "name": format!("Business {place_id}"),
            "rating": 4.7,
            "user_ratings_total": 32,
            "formatted_phone_number": "077 123 4567",
            "international_phone_number": "+94 77 123 4567",
            "business_status": "OPERATIONAL",
            "types": ["restaurant"],
            "formatted_address": "Colombo",
            "photos": [{ "photo_reference": format!("photo-{place_id}") }],
            "geometry": { "location": { "lat": 6.9, "lng": 79.8 } }
        }
    })
}

/// A details body that enriches fine but fails qualification (has a website).
fn webbed_detail(place_id: &str) -> serde_json::Value {
    let mut body = qualifying_detail(place_id);
    body["result"]["website"] = serde_json::json!("https://example.com");
    body
}

#[tokio::test]
async fn empty_query_is_rejected_before_any_provider_call() {
    let server = MockServer::start().await;

    let client = test_client(&server.uri());
    let err = search_leads(&client, "   ").await.unwrap_err();
    assert!(matches!(err, SearchError::EmptyQuery), "got: {err:?}");

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "provider must not be contacted");
}

#[tokio::test]
async fn zero_results_yields_empty_outcome_without_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ZERO_RESULTS"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = search_leads(&client, "nowhere").await.expect("not an error");
    assert!(outcome.leads.is_empty());
    assert_eq!(outcome.raw_count, 0);
    assert!(outcome.notice.is_none());
}

#[tokio::test]
async fn provider_error_status_aborts_the_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OVER_QUERY_LIMIT"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = search_leads(&client, "restaurants").await.unwrap_err();
    assert!(matches!(err, SearchError::Provider(_)), "got: {err:?}");
}

#[tokio::test]
async fn detail_failures_are_dropped_not_propagated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summaries(&["p1", "p2", "p3"])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(qualifying_detail("p1")))
        .mount(&server)
        .await;
    // p2's detail lookup fails at the provider; the batch must survive.
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "NOT_FOUND"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(webbed_detail("p3")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = search_leads(&client, "restaurants").await.expect("search should succeed");

    assert_eq!(outcome.raw_count, 2);
    assert_eq!(outcome.leads.len(), 1);
    assert_eq!(outcome.leads[0].place.place_id, "p1");
    assert!(outcome.notice.is_none());
}

#[tokio::test]
async fn candidate_set_is_capped_before_enrichment() {
    let server = MockServer::start().await;

    let ids: Vec<String> = (0..35).map(|i| format!("p{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summaries(&id_refs)))
        .mount(&server)
        .await;

    // Exactly 20 detail lookups, regardless of 35 text-search hits.
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(qualifying_detail("capped")))
        .expect(20)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = search_leads(&client, "restaurants").await.expect("search should succeed");

    assert_eq!(outcome.raw_count, 20);
    assert_eq!(outcome.leads.len(), 20);
}

#[tokio::test]
async fn output_order_tracks_text_search_ranking_not_completion_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summaries(&["p1", "p2", "p3"])))
        .mount(&server)
        .await;

    // The first-ranked candidate answers last; ranking must still win.
    for (id, delay_ms) in [("p1", 150_u64), ("p2", 50), ("p3", 0)] {
        Mock::given(method("GET"))
            .and(path("/details/json"))
            .and(query_param("place_id", id))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(qualifying_detail(id))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let client = test_client(&server.uri());
    let outcome = search_leads(&client, "restaurants").await.expect("search should succeed");

    let order: Vec<&str> = outcome
        .leads
        .iter()
        .map(|l| l.place.place_id.as_str())
        .collect();
    assert_eq!(order, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn notice_explains_when_candidates_exist_but_none_qualify() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summaries(&["p1", "p2"])))
        .mount(&server)
        .await;

    for id in ["p1", "p2"] {
        Mock::given(method("GET"))
            .and(path("/details/json"))
            .and(query_param("place_id", id))
            .respond_with(ResponseTemplate::new(200).set_body_json(webbed_detail(id)))
            .mount(&server)
            .await;
    }

    let client = test_client(&server.uri());
    let outcome = search_leads(&client, "restaurants").await.expect("search should succeed");

    assert!(outcome.leads.is_empty());
    assert_eq!(outcome.raw_count, 2);
    let notice = outcome.notice.expect("notice should explain the empty result");
    assert!(notice.contains("Found 2 businesses"), "got: {notice}");
}
