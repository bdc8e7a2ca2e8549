use axum::{
    Router,
    http::Method,
    routing::get,
};
use std::sync::Arc;
use tera::Tera;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::alert_service::TemplateChooser;
use crate::store::MemoryStore;
use crate::web::routes::*;

pub use crate::web::error::AppError;

pub mod dashboard;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
    pub templates: Arc<Tera>,
    pub template_chooser: Arc<dyn TemplateChooser>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(
    store: MemoryStore,
    templates: Arc<Tera>,
    template_chooser: Arc<dyn TemplateChooser>,
) -> Router {
    let app_state = Arc::new(AppState {
        store,
        templates,
        template_chooser,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard::dashboard_handler))
        .route("/api/health", get(health_check_handler))
        .nest("/api/monitors", monitor_routes::create_monitor_router())
        .nest("/api/alerts", alert_routes::create_alert_router())
        .nest("/api/integrations", integration_routes::create_integration_router())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::alert_service::RandomChooser;
    use crate::services::test_support::FixedChooser;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::collections::HashSet;
    use tower::ServiceExt;

    fn create_test_app_with(store: MemoryStore, chooser: Arc<dyn TemplateChooser>) -> Router {
        create_axum_router(store, Arc::new(dashboard::load_templates().unwrap()), chooser)
    }

    fn create_test_app(store: MemoryStore) -> Router {
        create_test_app_with(store, Arc::new(RandomChooser))
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, req).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_fresh_start_lists_seed_monitor() {
        let app = create_test_app(MemoryStore::seeded());
        let (status, body) = send_json(&app, request("GET", "/api/monitors", None)).await;

        assert_eq!(status, StatusCode::OK);
        let monitors = body.as_array().unwrap();
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0]["id"], 1);
        assert_eq!(monitors[0]["name"], "Wayfair API");
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let app = create_test_app(MemoryStore::seeded());
        let (status, created) = send_json(
            &app,
            request("POST", "/api/monitors", Some(json!({ "name": "X", "api_endpoint": "Y" }))),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 2);
        assert_eq!(created["status"], "healthy");
        assert_eq!(created["availability_monitoring"]["threshold_minutes"], 5);
        assert_eq!(created["availability_monitoring"]["last_incident"], Value::Null);
        assert_eq!(created["data_quality_monitoring"]["null_threshold_percent"], json!(10));
        assert_eq!(
            created["data_quality_monitoring"]["fields_monitored"],
            json!(["price", "inventory", "shipping_fee", "edd"])
        );
        assert_eq!(
            created["anomaly_detection"]["checks"],
            json!([
                "price_spikes",
                "shipping_fee_anomalies",
                "past_edds",
                "inventory_drops",
                "shipping_fluctuations"
            ])
        );
        assert_eq!(
            created["integrations"],
            json!({
                "slack": { "enabled": true, "webhook_url": "" },
                "email": { "enabled": true, "recipients": [] }
            })
        );

        let (status, fetched) = send_json(&app, request("GET", "/api/monitors/2", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_without_body_uses_defaults() {
        let app = create_test_app(MemoryStore::seeded());
        let (status, created) = send_json(&app, request("POST", "/api/monitors", None)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "");
        assert_eq!(created["api_endpoint"], "");
    }

    #[tokio::test]
    async fn test_update_merges_data_quality_threshold() {
        let app = create_test_app(MemoryStore::seeded());
        let (status, updated) = send_json(
            &app,
            request(
                "PUT",
                "/api/monitors/1",
                Some(json!({ "data_quality_monitoring": { "null_threshold_percent": 20 } })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let quality = &updated["data_quality_monitoring"];
        assert_eq!(quality["null_threshold_percent"], json!(20));
        assert_eq!(quality["enabled"], true);
        assert_eq!(quality["fields_monitored"], json!(["price", "inventory", "shipping_fee", "edd"]));
    }

    #[tokio::test]
    async fn test_unknown_monitor_is_404() {
        let app = create_test_app(MemoryStore::seeded());
        let expected = json!({ "error": "Monitor not found" });

        let (status, body) = send_json(&app, request("GET", "/api/monitors/9999", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let (status, body) =
            send_json(&app, request("PUT", "/api/monitors/9999", Some(json!({})))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_unparseable_monitor_id_is_404() {
        let app = create_test_app(MemoryStore::seeded());

        for uri in ["/api/monitors/99999999999", "/api/monitors/abc"] {
            let (status, bytes) = send(&app, request("GET", uri, None)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(bytes, br#"{"error":"Monitor not found"}"#);

            let (status, bytes) = send(&app, request("PUT", uri, Some(json!({})))).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(bytes, br#"{"error":"Monitor not found"}"#);
        }
    }

    #[tokio::test]
    async fn test_malformed_update_body_is_400() {
        let app = create_test_app(MemoryStore::seeded());
        let req = Request::builder()
            .method("PUT")
            .uri("/api/monitors/1")
            .body(Body::from("{oops"))
            .unwrap();
        let (status, body) = send_json(&app, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn test_typed_test_alert_recorded_on_monitor() {
        let app = create_test_app(MemoryStore::seeded());
        let (status, alert) =
            send_json(&app, request("POST", "/api/alerts/test?type=anomaly", None)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(alert["id"], 1);
        assert_eq!(alert["type"], "anomaly");
        assert_eq!(alert["title"], "Price Spike Detected");
        assert_eq!(alert["monitor_id"], 1);

        let (_, monitor) = send_json(&app, request("GET", "/api/monitors/1", None)).await;
        assert_eq!(monitor["anomaly_detection"]["history"][0], alert);

        let (status, alerts) = send_json(&app, request("GET", "/api/alerts", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(alerts, json!([alert]));
    }

    #[tokio::test]
    async fn test_untyped_test_alert_uses_chooser() {
        let app = create_test_app_with(MemoryStore::seeded(), Arc::new(FixedChooser(1)));
        let (status, alert) = send_json(&app, request("POST", "/api/alerts/test", None)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(alert["type"], "data_quality");
        assert_eq!(alert["severity"], "warning");
    }

    #[tokio::test]
    async fn test_untyped_test_alerts_cover_all_kinds() {
        let app = create_test_app(MemoryStore::seeded());
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let (_, alert) = send_json(&app, request("POST", "/api/alerts/test", None)).await;
            let kind = alert["type"].as_str().unwrap().to_string();
            assert!(["availability", "data_quality", "anomaly"].contains(&kind.as_str()));
            seen.insert(kind);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_integration_toggle_fans_out() {
        let app = create_test_app(MemoryStore::seeded());
        send_json(&app, request("POST", "/api/monitors", Some(json!({ "slack_webhook": "w" })))).await;

        let (status, body) = send_json(
            &app,
            request("PUT", "/api/integrations", Some(json!({ "slack": { "enabled": false } }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Integrations updated" }));

        let (_, monitors) = send_json(&app, request("GET", "/api/monitors", None)).await;
        let monitors = monitors.as_array().unwrap();
        assert!(monitors.iter().all(|m| m["integrations"]["slack"]["enabled"] == false));
        assert_eq!(
            monitors[0]["integrations"]["slack"]["webhook_url"],
            "https://hooks.slack.com/services/..."
        );
        assert_eq!(monitors[1]["integrations"]["slack"]["webhook_url"], "w");
    }

    #[tokio::test]
    async fn test_dashboard_renders_html() {
        let app = create_test_app(MemoryStore::seeded());
        send(&app, request("POST", "/api/alerts/test?type=availability", None)).await;

        let (status, bytes) = send(&app, request("GET", "/", None)).await;
        let html = String::from_utf8(bytes).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Wayfair API"));
        assert!(html.contains("API Unresponsive"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app(MemoryStore::default());
        let (status, bytes) = send(&app, request("GET", "/api/health", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"OK");
    }
}
