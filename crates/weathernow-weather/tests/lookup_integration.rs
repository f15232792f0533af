//! Integration tests for the lookup pipeline using wiremock.
//!
//! One mock server stands in for both the geocoding and the forecast API.

use std::sync::Arc;
use std::time::Duration;

use weathernow_weather::{
    GeocoderClient, LookupController, LookupError, LookupState, PlaceQuery, WeatherLookup,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paris_geocoding() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 2988507,
            "name": "Paris",
            "latitude": 48.85,
            "longitude": 2.35,
            "country_code": "FR",
            "timezone": "Europe/Paris"
        }],
        "generationtime_ms": 0.5
    })
}

fn paris_forecast() -> serde_json::Value {
    serde_json::json!({
        "latitude": 48.86,
        "longitude": 2.34,
        "current_weather": {
            "temperature": 18.4,
            "windspeed": 12,
            "winddirection": 270,
            "weathercode": 3,
            "is_day": 1,
            "time": "2024-05-01T12:00"
        }
    })
}

fn lookup_for(server: &MockServer) -> WeatherLookup {
    WeatherLookup::with_client(reqwest::Client::new(), &server.uri(), &server.uri())
}

async fn mount_paris(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocoding()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_paris_end_to_end() {
    let server = MockServer::start().await;
    mount_paris(&server).await;

    let controller = LookupController::new(lookup_for(&server));
    let state = controller.submit("Paris").await.unwrap();

    let report = state.report().unwrap();
    assert_eq!(report.place.display_name, "Paris");
    assert_eq!(report.place.country_code.as_deref(), Some("FR"));
    assert_eq!(report.conditions.temperature_c, 18.4);
    assert_eq!(report.conditions.wind_speed_kmh, 12.0);
    assert_eq!(report.conditions.wind_direction_deg, 270);
    assert_eq!(report.descriptor().label, "Overcast");
    assert_eq!(report.descriptor().icon, "☁");
    assert_eq!(controller.state(), state);
}

#[tokio::test]
async fn test_city_not_found_skips_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Zzzznotacity"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generationtime_ms": 0.3})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast()))
        .expect(0)
        .mount(&server)
        .await;

    let controller = LookupController::new(lookup_for(&server));
    let state = controller.submit("Zzzznotacity").await.unwrap();

    assert_eq!(state, LookupState::Failed("City not found".into()));
}

#[tokio::test]
async fn test_empty_results_array_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
        .mount(&server)
        .await;

    let query = PlaceQuery::parse("Atlantis").unwrap();
    let err = lookup_for(&server).run(&query).await.unwrap_err();
    assert!(matches!(err, LookupError::CityNotFound));
}

#[tokio::test]
async fn test_geocoding_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let controller = LookupController::new(lookup_for(&server));
    let state = controller.submit("Paris").await.unwrap();
    assert_eq!(state.error_message(), Some("Geocoding failed"));
}

#[tokio::test]
async fn test_geocoding_unreachable() {
    // Nothing listens here once the server is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let geocoder = GeocoderClient::new(reqwest::Client::new(), &uri);
    let err = geocoder.resolve("Paris").await.unwrap_err();
    assert!(matches!(err, LookupError::GeocodingTransport(_)));
    assert_eq!(err.user_message(), "Geocoding failed");
}

#[tokio::test]
async fn test_forecast_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocoding()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = LookupController::new(lookup_for(&server));
    let state = controller.submit("Paris").await.unwrap();
    assert_eq!(state.error_message(), Some("Weather fetch failed"));
    assert!(state.report().is_none());
}

#[tokio::test]
async fn test_malformed_forecast_fails_cleanly() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocoding()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 48.86,
            "hourly": {}
        })))
        .mount(&server)
        .await;

    let controller = LookupController::new(lookup_for(&server));
    let state = controller.submit("Paris").await.unwrap();
    assert_eq!(
        state.error_message(),
        Some("Received an unexpected response from the forecast service")
    );
}

#[tokio::test]
async fn test_malformed_geocoding_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let query = PlaceQuery::parse("Paris").unwrap();
    let err = lookup_for(&server).run(&query).await.unwrap_err();
    assert!(matches!(err, LookupError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_place_name_is_url_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = GeocoderClient::new(reqwest::Client::new(), &server.uri());
    let err = geocoder.resolve("São Paulo & Co").await.unwrap_err();
    assert!(matches!(err, LookupError::CityNotFound));
}

#[tokio::test]
async fn test_blank_query_issues_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let controller = LookupController::new(lookup_for(&server));
    assert!(controller.submit("   ").await.is_none());
    assert!(controller.submit("").await.is_none());
    assert_eq!(controller.state(), LookupState::Idle);
}

#[tokio::test]
async fn test_repeated_lookup_is_independent_and_identical() {
    let server = MockServer::start().await;
    mount_paris(&server).await;

    let controller = LookupController::new(lookup_for(&server));
    let first = controller.submit("Paris").await.unwrap();
    let second = controller.submit(" Paris ").await.unwrap();

    assert!(first.report().is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_latest_lookup_wins_over_slow_one() {
    let server = MockServer::start().await;
    mount_paris(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Slowtown"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"results": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let controller = Arc::new(LookupController::new(lookup_for(&server)));

    let slow = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit("Slowtown").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast = controller.submit("Paris").await.unwrap();
    let superseded = slow.await.unwrap();

    assert!(superseded.is_none());
    assert_eq!(fast.report().unwrap().place.display_name, "Paris");
    assert_eq!(controller.state(), fast);
}
