//! Integration tests for the Open-Meteo client and the session on top of it,
//! run against a mock HTTP server.

use outfit_core::{
    ConfigStore, LocationSearch, OpenMeteo, Phase, ProviderError, SearchOutcome, Session,
    WeatherSource, session,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens here, so every request fails at the transport level.
const UNREACHABLE: &str = "http://127.0.0.1:1";

fn client(server: &MockServer) -> OpenMeteo {
    OpenMeteo::new(
        format!("{}/v1/search", server.uri()),
        format!("{}/v1/forecast", server.uri()),
    )
}

fn london_results() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 2643743,
            "name": "London",
            "latitude": 51.51,
            "longitude": -0.13,
            "country": "United Kingdom",
            "admin1": "England"
        }],
        "generationtime_ms": 0.7
    })
}

fn forecast(temperature: f64, code: i32) -> serde_json::Value {
    serde_json::json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "current_weather": {
            "temperature": temperature,
            "windspeed": 11.2,
            "weathercode": code,
            "time": "2026-10-19T10:00"
        },
        "hourly": {
            "time": ["2026-10-19T00:00", "2026-10-19T01:00"],
            "temperature_2m": [12.1, 11.8],
            "weathercode": [3, 2]
        }
    })
}

async fn mount_forecast(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "51.51"))
        .and(query_param("longitude", "-0.13"))
        .and(query_param("current_weather", "true"))
        .and(query_param("hourly", "temperature_2m,weathercode"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_sends_fixed_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Lon"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_results()))
        .expect(1)
        .mount(&server)
        .await;

    let candidates = client(&server).search("Lon").await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].label(), "London, England, United Kingdom");
    assert_eq!(candidates[0].latitude, 51.51);
    assert_eq!(candidates[0].longitude, -0.13);
}

#[tokio::test]
async fn search_without_results_key_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.2 })),
        )
        .mount(&server)
        .await;

    let candidates = client(&server).search("Qqqqq").await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn search_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server).search("London").await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 503, .. }), "{err:?}");
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn search_transport_failure() {
    let client = OpenMeteo::new(format!("{UNREACHABLE}/v1/search"), format!("{UNREACHABLE}/v1/forecast"));

    let err = client.search("London").await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn current_weather_is_parsed() {
    let server = MockServer::start().await;
    mount_forecast(&server, forecast(27.0, 0)).await;

    let obs = client(&server).current(51.51, -0.13).await.unwrap();

    assert_eq!(obs.temperature, Some(27.0));
    assert_eq!(obs.weather_code, 0);
    assert_eq!(obs.hourly.time.len(), 2);
    assert_eq!(obs.hourly.temperature_2m, vec![Some(12.1), Some(11.8)]);
}

#[tokio::test]
async fn missing_current_weather_has_no_temperature() {
    let server = MockServer::start().await;
    mount_forecast(&server, serde_json::json!({ "latitude": 51.5, "longitude": -0.12 })).await;

    let obs = client(&server).current(51.51, -0.13).await.unwrap();

    assert_eq!(obs.temperature, None);
    assert_eq!(obs.weather_code, 0);
}

#[tokio::test]
async fn forecast_error_status_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&server)
        .await;

    let err = client(&server).current(123.0, 0.0).await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 400, .. }), "{err:?}");
}

#[tokio::test]
async fn malformed_forecast_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).current(51.51, -0.13).await.unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn session_search_select_display() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Lon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_results()))
        .mount(&server)
        .await;
    mount_forecast(&server, forecast(27.0, 0)).await;

    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let api = client(&server);
    let mut s = Session::open(ConfigStore::new(&state), Box::new(api.clone()), Box::new(api));

    let Some(SearchOutcome::Found(candidates)) = s.search("Lon").await.cloned() else {
        panic!("expected London in the results");
    };

    let Phase::Displayed(report) = s.select(&candidates[0]).await else {
        panic!("expected weather to be displayed");
    };
    assert_eq!(report.condition.description(), "Clear sky");
    assert_eq!(report.outfit.len(), 6);
    assert_eq!(report.observation.temperature_label(), "27.0°C");

    let (_, saved) = ConfigStore::new(&state).load();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved.last().map(|l| l.display_name.as_str()), Some("London, England"));
}

#[tokio::test]
async fn session_reports_unreachable_geocoder() {
    let dir = tempfile::tempdir().unwrap();
    let api = OpenMeteo::new(format!("{UNREACHABLE}/v1/search"), format!("{UNREACHABLE}/v1/forecast"));
    let mut s = Session::open(
        ConfigStore::new(dir.path().join("state.json")),
        Box::new(api.clone()),
        Box::new(api),
    );

    let outcome = s.search("London").await.cloned();
    assert_eq!(outcome, Some(SearchOutcome::Failed));
    assert_eq!(outcome.and_then(|o| o.message()), Some(session::SEARCH_FAILED));
    assert_ne!(session::SEARCH_FAILED, session::NO_RESULTS);
}

#[tokio::test]
async fn session_weather_failure_is_final() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let api = client(&server);
    let mut s = Session::open(
        ConfigStore::new(dir.path().join("state.json")),
        Box::new(api.clone()),
        Box::new(api),
    );

    let phase = s.show_location(outfit_core::Location::new("London, England", 51.51, -0.13)).await;
    assert!(matches!(phase, Phase::Failed(_)));
    assert!(s.observation().is_none());
}
