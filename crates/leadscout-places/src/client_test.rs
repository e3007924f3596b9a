use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    let bias = SearchBias {
        latitude: 7.8731,
        longitude: 80.7718,
        radius_m: 150_000,
    };
    PlacesClient::with_base_url("test-key", 30, bias, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_joins_endpoint_and_appends_key_last() {
    let client = test_client("https://maps.googleapis.com/maps/api/place");
    let url = client
        .build_url("textsearch/json", &[("query", "bakeries in kandy")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/place/textsearch/json?query=bakeries+in+kandy&key=test-key"
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("https://maps.googleapis.com/maps/api/place/");
    let url = client
        .build_url("details/json", &[("place_id", "ChIJ123")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/place/details/json?place_id=ChIJ123&key=test-key"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.googleapis.com/maps/api/place");
    let url = client
        .build_url("textsearch/json", &[("query", "spice & rice")])
        .unwrap();
    assert!(
        url.as_str().contains("spice+%26+rice") || url.as_str().contains("spice%20%26%20rice"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn photo_url_carries_reference_width_and_key() {
    let client = test_client("https://maps.googleapis.com/maps/api/place");
    let url = client.photo_url("ref-abc").expect("should build photo URL");
    assert!(url.contains("photo?"));
    assert!(url.contains("maxwidth=400"));
    assert!(url.contains("photo_reference=ref-abc"));
    assert!(url.contains("key=test-key"));
}

#[test]
fn photo_url_degrades_to_none_for_blank_reference() {
    let client = test_client("https://maps.googleapis.com/maps/api/place");
    assert_eq!(client.photo_url(""), None);
    assert_eq!(client.photo_url("   "), None);
}
