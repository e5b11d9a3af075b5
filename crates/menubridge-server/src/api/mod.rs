mod catalog;
mod locations;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{log_requests, request_id};
use crate::service::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    ok: bool,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/locations", get(locations::list_locations))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/catalog/categories", get(catalog::list_categories))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn(log_requests)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { ok: true })
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use menubridge_core::CacheSettings;
    use menubridge_square::SquareClient;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn app_for(base_url: &str, token: Option<&str>) -> Router {
        let client = SquareClient::with_base_url(token, 5, base_url).expect("client");
        build_app(AppState {
            catalog: Arc::new(CatalogService::new(client, CacheSettings::default())),
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    async fn mount_catalog(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v2/catalog/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "objects": [
                    {
                        "id": "ITEM_CLUB",
                        "type": "ITEM",
                        "present_at_location_ids": ["loc_1"],
                        "item_data": {
                            "name": "Club",
                            "description": "Triple decker",
                            "category_id": "CAT_SANDWICHES",
                            "image_ids": ["IMG_CLUB"],
                            "variations": [
                                {
                                    "id": "VAR_WHOLE",
                                    "type": "ITEM_VARIATION",
                                    "item_variation_data": { "name": "Whole", "price_money": { "amount": 1099, "currency": "USD" } }
                                },
                                {
                                    "id": "VAR_HALF",
                                    "type": "ITEM_VARIATION",
                                    "item_variation_data": { "name": "Half", "price_money": { "amount": 699, "currency": "USD" } }
                                }
                            ]
                        }
                    },
                    {
                        "id": "ITEM_BLT",
                        "type": "ITEM",
                        "present_at_all_locations": true,
                        "item_data": { "name": "BLT", "category_id": "CAT_SANDWICHES" }
                    }
                ],
                "related_objects": [
                    { "id": "CAT_SANDWICHES", "type": "CATEGORY", "category_data": { "name": "Sandwiches" } },
                    { "id": "IMG_CLUB", "type": "IMAGE", "image_data": { "url": "https://img.example.com/club.jpg" } }
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn health_returns_ok_true() {
        let (status, json) = get_json(app_for("http://127.0.0.1:9", None), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn locations_returns_active_locations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "locations": [{
                    "id": "loc_1",
                    "name": "Downtown",
                    "status": "ACTIVE",
                    "timezone": "America/New_York",
                    "address": { "address_line_1": "1 Main St" }
                }]
            })))
            .mount(&server)
            .await;

        let (status, json) = get_json(app_for(&server.uri(), Some("t")), "/api/locations").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([{
                "id": "loc_1",
                "name": "Downtown",
                "address": "1 Main St",
                "timezone": "America/New_York",
                "status": "ACTIVE"
            }])
        );
    }

    #[tokio::test]
    async fn catalog_returns_grouped_items_for_location() {
        let server = MockServer::start().await;
        mount_catalog(&server).await;

        let (status, json) =
            get_json(app_for(&server.uri(), Some("t")), "/api/catalog?location_id=loc_1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["locationId"], "loc_1");
        let group = &json["categories"][0];
        assert_eq!(group["id"], "sandwiches");
        assert_eq!(group["name"], "Sandwiches");
        let club = &group["items"][0];
        assert_eq!(club["imageUrl"], "https://img.example.com/club.jpg");
        assert_eq!(
            club["variations"],
            json!([
                { "id": "VAR_HALF", "name": "Half", "priceCents": 699 },
                { "id": "VAR_WHOLE", "name": "Whole", "priceCents": 1099 }
            ])
        );
        assert_eq!(group["items"][1]["imageUrl"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn categories_returns_item_counts() {
        let server = MockServer::start().await;
        mount_catalog(&server).await;

        let (status, json) = get_json(
            app_for(&server.uri(), Some("t")),
            "/api/catalog/categories?location_id=loc_2",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([{ "id": "sandwiches", "name": "Sandwiches", "itemCount": 1 }])
        );
    }

    #[tokio::test]
    async fn catalog_without_location_id_is_bad_request() {
        let (status, json) = get_json(app_for("http://127.0.0.1:9", Some("t")), "/api/catalog").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({ "code": "BAD_REQUEST", "message": "Query param location_id is required" })
        );
    }

    #[tokio::test]
    async fn categories_with_blank_location_id_is_bad_request() {
        let (status, json) = get_json(
            app_for("http://127.0.0.1:9", Some("t")),
            "/api/catalog/categories?location_id=%20%20",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn upstream_error_maps_to_square_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/catalog/search"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(json!({ "errors": [{ "detail": "Timeout" }] })),
            )
            .mount(&server)
            .await;

        let (status, json) =
            get_json(app_for(&server.uri(), Some("t")), "/api/catalog?location_id=loc_1").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json,
            json!({
                "code": "SQUARE_API_ERROR",
                "message": "Square API request failed",
                "details": ["Timeout"]
            })
        );
    }

    #[tokio::test]
    async fn missing_token_maps_to_config_error() {
        let (status, json) = get_json(app_for("http://127.0.0.1:9", None), "/api/locations").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "CONFIG_ERROR");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn malformed_upstream_body_is_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
            .mount(&server)
            .await;

        let (status, json) = get_json(app_for(&server.uri(), Some("t")), "/api/locations").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({ "code": "INTERNAL_ERROR", "message": "Unexpected server error" })
        );
    }
}
