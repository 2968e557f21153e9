mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use weather_yield_api::api::create_router;
use weather_yield_api::query::QueryService;
use weather_yield_api::settings::PaginationSettings;

async fn router() -> Router {
    let db = common::seeded_database().await;
    create_router(QueryService::new(db, PaginationSettings::default()))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn data(body: &Value) -> &Vec<Value> {
    body["data"].as_array().expect("data array")
}

#[tokio::test]
async fn test_weather_default_page() {
    let (status, body) = get(router().await, "/api/weather").await;

    assert_eq!(status, StatusCode::OK);
    let rows = data(&body);
    assert_eq!(rows.len(), 10);
    assert_eq!(
        rows[0],
        json!({
            "date": "19150101",
            "station_id": "test1",
            "max_temp": 1.0,
            "min_temp": -1.0,
            "precipitation": 0.5
        })
    );
}

#[tokio::test]
async fn test_weather_filters_combine() {
    let (_, body) = get(router().await, "/api/weather?station_id=test2&per_page=100").await;
    assert_eq!(data(&body).len(), 20);

    let (_, body) = get(router().await, "/api/weather?date=19160105").await;
    assert_eq!(data(&body).len(), 1);

    let (_, body) = get(router().await, "/api/weather?date=19160105&station_id=test1").await;
    assert!(data(&body).is_empty());
}

#[tokio::test]
async fn test_unknown_station_is_empty_ok() {
    let (status, body) = get(router().await, "/api/weather?station_id=unknown").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_filters_match_exactly() {
    let (_, body) = get(router().await, "/api/weather?station_id=%20test1%20").await;
    assert_eq!(body, json!({ "data": [] }));

    let (_, body) = get(router().await, "/api/weather?station_id=%20&per_page=100").await;
    assert_eq!(data(&body).len(), 29);
}

#[tokio::test]
async fn test_per_page_capped_at_max() {
    let (_, body) = get(router().await, "/api/weather?per_page=1000").await;
    // 29 rows stored, all fit under the cap
    assert_eq!(data(&body).len(), 29);

    let db = common::seeded_database().await;
    let small_cap = PaginationSettings {
        default_page: 1,
        default_per_page: 5,
        max_per_page: 7,
    };
    let (_, body) = get(create_router(QueryService::new(db, small_cap)), "/api/weather?per_page=1000").await;
    assert_eq!(data(&body).len(), 7);
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let (_, first) = get(router().await, "/api/weather?page=1&per_page=15").await;
    let (_, second) = get(router().await, "/api/weather?page=2&per_page=15").await;
    let (_, third) = get(router().await, "/api/weather?page=3&per_page=15").await;

    assert_eq!(data(&first).len(), 15);
    assert_eq!(data(&second).len(), 14);
    assert!(data(&third).is_empty());
    assert!(data(&first).iter().all(|row| !data(&second).contains(row)));
}

#[tokio::test]
async fn test_invalid_pagination_is_empty_ok() {
    for uri in [
        "/api/weather?page=abc",
        "/api/weather?page=0",
        "/api/weather?page=-1",
        "/api/weather/stats?per_page=ten",
        "/api/yield?per_page=0",
        "/api/yield?page=%ZZ",
    ] {
        let (status, body) = get(router().await, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!({ "data": [] }), "{}", uri);
    }
}

#[tokio::test]
async fn test_weather_stats_shape() {
    let (status, body) = get(router().await, "/api/weather/stats?year=1916&station_id=test2").await;

    assert_eq!(status, StatusCode::OK);
    let rows = data(&body);
    assert_eq!(rows.len(), 1);

    let row = rows[0].as_object().unwrap();
    let mut fields: Vec<&str> = row.keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(
        fields,
        vec!["avg_max_temp", "avg_min_temp", "station_id", "total_precipitation", "year"]
    );
    assert_eq!(row["year"], "1916");
    assert!((row["avg_max_temp"].as_f64().unwrap() - 5.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_weather_stats_by_year() {
    let (_, body) = get(router().await, "/api/weather/stats?year=1915").await;
    let stations: Vec<&str> = data(&body).iter().map(|r| r["station_id"].as_str().unwrap()).collect();
    assert_eq!(stations, vec!["test1", "test2"]);
}

#[tokio::test]
async fn test_yield_routes() {
    let (_, body) = get(router().await, "/api/yield").await;
    let years: Vec<&str> = data(&body).iter().map(|r| r["year"].as_str().unwrap()).collect();
    assert_eq!(years, vec!["1985", "1986", "1987", "1988", "1989", "1990"]);

    let (_, body) = get(router().await, "/api/yield?year=1988").await;
    assert_eq!(body, json!({ "data": [{ "year": "1988", "corn_yield": 125194 }] }));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(router().await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "weather-yield-api");
}
