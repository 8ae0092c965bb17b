use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Category, Fixtures, Venue};
use serde_json::Value;
use tower::ServiceExt;

const AUTH: &str = "client_id=id&client_secret=secret&v=20150813";
const CAFE_ID: &str = "40a55d80f964a52020f31ee3";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- venues ---

#[tokio::test]
async fn get_venue_returns_success_envelope() {
    let resp = app(Fixtures::sample())
        .oneshot(get(&format!("/v2/venues/{CAFE_ID}?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["code"], 200);
    assert!(body["notifications"].is_array());
    let venue: Venue = serde_json::from_value(body["response"]["venue"].clone()).unwrap();
    assert_eq!(venue.name, "Clinton St. Baking Co.");
    assert!(venue.categories[0].primary);
}

#[tokio::test]
async fn unknown_venue_is_param_error() {
    let resp = app(Fixtures::sample())
        .oneshot(get(&format!("/v2/venues/nope?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["code"], 400);
    assert_eq!(body["meta"]["errorType"], "param_error");
    assert_eq!(body["response"], serde_json::json!({}));
}

#[tokio::test]
async fn missing_credentials_is_invalid_auth() {
    let resp = app(Fixtures::sample())
        .oneshot(get(&format!("/v2/venues/{CAFE_ID}?v=20150813")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["code"], 400);
    assert_eq!(body["meta"]["errorType"], "invalid_auth");
}

// --- categories ---

#[tokio::test]
async fn categories_returns_tree() {
    let resp = app(Fixtures::sample())
        .oneshot(get(&format!("/v2/venues/categories?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let categories: Vec<Category> =
        serde_json::from_value(body["response"]["categories"].clone()).unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Food");
    assert_eq!(categories[0].categories[0].name, "Coffee Shop");
}

#[tokio::test]
async fn categories_route_wins_over_venue_id() {
    // "categories" must not be treated as a venue id.
    let resp = app(Fixtures::default())
        .oneshot(get(&format!("/v2/venues/categories?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["response"]["categories"], serde_json::json!([]));
}

#[tokio::test]
async fn categories_require_credentials() {
    let resp = app(Fixtures::sample())
        .oneshot(get("/v2/venues/categories"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- routing ---

#[tokio::test]
async fn unversioned_path_is_404() {
    let resp = app(Fixtures::sample())
        .oneshot(get(&format!("/venues/{CAFE_ID}?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
