mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use climate_api::{Config, test_utils::seed_measurement};
use common::TestHarness;
use serde_json::{Value, json};
use std::collections::BTreeSet;

#[tokio::test]
async fn test_home_lists_every_route() {
    let harness = TestHarness::new().await;
    let (status, body) = harness.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/&lt;start&gt;",
        "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
    ] {
        assert!(html.contains(route), "missing {route}");
    }
}

#[tokio::test]
async fn test_precipitation_last_twelve_months() {
    let harness = TestHarness::with_fixture().await;
    let (status, body) = harness.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "2016-08-23": 0.0,
            "2017-01-15": 0.0,
            "2017-08-01": 0.02,
            "2017-08-18": 0.06,
            "2017-08-23": 0.0
        })
    );
}

#[tokio::test]
async fn test_precipitation_keys_stay_in_window() {
    let harness = TestHarness::with_fixture().await;
    let (_, body) = harness.get_json("/api/v1.0/precipitation").await;

    for key in body.as_object().unwrap().keys() {
        assert!(key.as_str() >= "2016-08-23" && key.as_str() <= "2017-08-23");
    }
}

#[tokio::test]
async fn test_precipitation_empty_store() {
    let harness = TestHarness::new().await;
    let (status, body) = harness.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_precipitation_null_value_is_kept() {
    let harness = TestHarness::new().await;
    seed_measurement(&harness.server.database, "S1", "2020-02-02", None, 70.0).await;

    let (_, body) = harness.get_json("/api/v1.0/precipitation").await;
    assert_eq!(body, json!({"2020-02-02": null}));
}

#[tokio::test]
async fn test_stations_match_table() {
    let harness = TestHarness::with_fixture().await;
    let (status, body) = harness.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let codes: BTreeSet<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["station"].as_str().unwrap().to_string())
        .collect();
    let expected: BTreeSet<_> = ["USC00513117", "USC00519281", "USC00519397"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(codes, expected);
    assert_eq!(
        body[1],
        json!({"station": "USC00519281", "name": "WAIHEE 837.5, HI US"})
    );
}

#[tokio::test]
async fn test_stations_empty_store() {
    let harness = TestHarness::new().await;
    let (status, body) = harness.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_tobs_for_most_active_station() {
    let harness = TestHarness::with_fixture().await;
    let (status, body) = harness.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"date": "2016-08-23", "temperature": 77.0},
            {"date": "2017-01-15", "temperature": 68.0},
            {"date": "2017-08-01", "temperature": 76.0},
            {"date": "2017-08-18", "temperature": 79.0}
        ])
    );
}

#[tokio::test]
async fn test_tobs_empty_store() {
    let harness = TestHarness::new().await;
    let (status, body) = harness.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_stats_from_start() {
    let harness = TestHarness::with_fixture().await;
    let (status, body) = harness.get_json("/api/v1.0/2017-08-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["TMIN"], 76.0);
    assert_eq!(body["TMAX"], 81.0);
    assert!((body["TAVG"].as_f64().unwrap() - 78.6).abs() < 1e-9);
}

#[tokio::test]
async fn test_stats_for_range() {
    let harness = TestHarness::with_fixture().await;
    let (status, body) = harness.get_json("/api/v1.0/2017-08-01/2017-08-18").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"TMIN": 76.0, "TAVG": 78.0, "TMAX": 80.0}));
}

#[tokio::test]
async fn test_stats_are_ordered() {
    let harness = TestHarness::with_fixture().await;

    for uri in [
        "/api/v1.0/2010-01-01",
        "/api/v1.0/2016-08-23/2017-01-15",
        "/api/v1.0/2017-08-23",
    ] {
        let (_, body) = harness.get_json(uri).await;
        let tmin = body["TMIN"].as_f64().unwrap();
        let tavg = body["TAVG"].as_f64().unwrap();
        let tmax = body["TMAX"].as_f64().unwrap();
        assert!(tmin <= tavg && tavg <= tmax, "{uri}: {body}");
    }
}

#[tokio::test]
async fn test_stats_without_matches_are_null() {
    let harness = TestHarness::with_fixture().await;
    let nulls = json!({"TMIN": null, "TAVG": null, "TMAX": null});

    let (status, body) = harness.get_json("/api/v1.0/2030-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, nulls);

    let (_, body) = harness.get_json("/api/v1.0/2017-08-23/2016-01-01").await;
    assert_eq!(body, nulls);

    // Dates are compared as text, never validated
    let (status, body) = harness.get_json("/api/v1.0/not-a-date").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, nulls);
}

#[tokio::test]
async fn test_reads_are_idempotent() {
    let harness = TestHarness::with_fixture().await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2016-01-01/2017-01-01",
    ] {
        let first: Value = harness.get_json(uri).await.1;
        let second: Value = harness.get_json(uri).await.1;
        assert_eq!(first, second, "{uri}");
    }
}

#[tokio::test]
async fn test_inserted_measurement_shows_up_only_inside_window() {
    let harness = TestHarness::with_fixture().await;
    let database = &harness.server.database;

    seed_measurement(database, "USC00519397", "2017-05-05", Some(3.3), 72.0).await;
    seed_measurement(database, "USC00519397", "2015-05-05", Some(4.4), 72.0).await;

    let (_, body) = harness.get_json("/api/v1.0/precipitation").await;
    assert_eq!(body["2017-05-05"], 3.3);
    assert!(body.get("2015-05-05").is_none());
}

#[tokio::test]
async fn test_missing_tables_are_server_errors() {
    let harness = TestHarness::without_schema().await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2017-01-01",
        "/api/v1.0/2017-01-01/2017-02-01",
    ] {
        let (status, body) = harness.get_json(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body["error"], "Database error");
    }
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let harness = TestHarness::new().await;
    let id = "0b5c1c5e-4b3e-4c39-9d0a-7f3f2c1e9a10";

    let request = Request::builder()
        .uri("/api/v1.0/stations")
        .header("x-request-id", id)
        .body(Body::empty())
        .unwrap();
    let response = harness.make_request(request).await;

    assert_eq!(response.headers()["x-request-id"], id);
}

#[tokio::test]
async fn test_health_reports_database() {
    let harness = TestHarness::new().await;

    let (status, body) = harness.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "climate-api");

    let (status, body) = harness.get_json("/health?check=database").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_describes_climate_routes() {
    let harness = TestHarness::new().await;
    let (status, body) = harness.get_json("/api/docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/{start}",
        "/api/v1.0/{start}/{end}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn test_request_logging_can_be_disabled() {
    let mut config = Config::default();
    config.logging.log_request = false;
    let harness = TestHarness::with_config(config).await;

    let (status, _) = harness.get_json("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
}
