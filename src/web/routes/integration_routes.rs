use axum::{Json, Router, extract::State, routing::put};
use std::sync::Arc;

use crate::services::integration_service;
use crate::web::AppState;
use crate::web::extract::LenientJson;
use crate::web::models::integration_models::UpdateIntegrationsRequest;

pub fn create_integration_router() -> Router<Arc<AppState>> {
    Router::new().route("/", put(update_integrations))
}

async fn update_integrations(
    State(app_state): State<Arc<AppState>>,
    LenientJson(payload): LenientJson<UpdateIntegrationsRequest>,
) -> Json<serde_json::Value> {
    integration_service::update_integrations(&app_state.store, &payload).await;
    Json(serde_json::json!({ "message": "Integrations updated" }))
}
