//! In-process stand-in for the venue API.
//!
//! Serves the same envelope the real service does, from a fixed set of
//! fixtures, and enforces the credential parameters every call must carry.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const REQUIRED_PARAMS: [&str; 3] = ["client_id", "client_secret", "v"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
}

impl Category {
    fn leaf(id: &str, name: &str, plural: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            plural_name: plural.to_string(),
            short_name: name.to_string(),
            primary: false,
            categories: Vec::new(),
        }
    }
}

/// The data a server instance answers from.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub venues: HashMap<String, Venue>,
    pub categories: Vec<Category>,
}

impl Fixtures {
    /// Two venues and a small two-level category tree.
    pub fn sample() -> Self {
        let coffee = Category::leaf("4bf58dd8d48988d1e0931735", "Coffee Shop", "Coffee Shops");
        let bakery = Category::leaf("4bf58dd8d48988d16a941735", "Bakery", "Bakeries");
        let park = Category::leaf("4bf58dd8d48988d163941735", "Park", "Parks");

        let mut food = Category::leaf("4d4b7105d754a06374d81259", "Food", "Food");
        food.categories = vec![coffee.clone(), bakery];
        let mut outdoors = Category::leaf("4d4b7105d754a06377d81259", "Outdoors & Recreation", "Outdoors & Recreation");
        outdoors.categories = vec![park.clone()];

        let cafe = Venue {
            id: "40a55d80f964a52020f31ee3".to_string(),
            name: "Clinton St. Baking Co.".to_string(),
            location: Some(json!({
                "address": "4 Clinton St",
                "lat": 40.72107924768216,
                "lng": -73.98394256830215,
                "postalCode": "10002",
                "cc": "US",
                "city": "New York",
                "state": "NY",
                "country": "United States",
                "formattedAddress": ["4 Clinton St", "New York, NY 10002"]
            })),
            categories: vec![Category { primary: true, ..coffee }],
            verified: true,
        };
        let park_venue = Venue {
            id: "412d2800f964a520df0c1fe3".to_string(),
            name: "Central Park".to_string(),
            location: Some(json!({"lat": 40.7828, "lng": -73.9653, "cc": "US"})),
            categories: vec![Category { primary: true, ..park }],
            verified: false,
        };

        Self {
            venues: [cafe, park_venue]
                .into_iter()
                .map(|v| (v.id.clone(), v))
                .collect(),
            categories: vec![food, outdoors],
        }
    }
}

pub type Db = Arc<Fixtures>;

pub fn app(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/v2/venues/categories", get(list_categories))
        .route("/v2/venues/{id}", get(get_venue))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app(fixtures)).await
}

/// A failed envelope with the given code and meta details.
fn failure(code: StatusCode, error_type: &str, error_detail: String) -> Response {
    let body = json!({
        "meta": {
            "code": code.as_u16(),
            "errorType": error_type,
            "errorDetail": error_detail,
        },
        "response": {},
    });
    (code, Json(body)).into_response()
}

fn success(response: Value) -> Response {
    let body = json!({
        "meta": { "code": 200, "requestId": "mock" },
        "notifications": [{ "type": "notificationTray", "item": { "unreadCount": 0 } }],
        "response": response,
    });
    (StatusCode::OK, Json(body)).into_response()
}

fn check_auth(params: &HashMap<String, String>) -> Result<(), Response> {
    match REQUIRED_PARAMS
        .into_iter()
        .find(|p| params.get(*p).map_or(true, String::is_empty))
    {
        Some(missing) => Err(failure(
            StatusCode::BAD_REQUEST,
            "invalid_auth",
            format!("Missing access credentials: {missing}"),
        )),
        None => Ok(()),
    }
}

async fn list_categories(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = check_auth(&params) {
        return rejection;
    }
    success(json!({ "categories": db.categories }))
}

async fn get_venue(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = check_auth(&params) {
        return rejection;
    }
    match db.venues.get(&id) {
        Some(venue) => success(json!({ "venue": venue })),
        None => failure(
            StatusCode::BAD_REQUEST,
            "param_error",
            format!("Value {id} is invalid for venue id"),
        ),
    }
}
