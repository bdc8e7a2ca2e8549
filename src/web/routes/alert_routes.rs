use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

use crate::services::alert_service;
use crate::store::models::Alert;
use crate::web::AppState;
use crate::web::models::alert_models::TestAlertQuery;

pub fn create_alert_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_alerts))
        .route("/test", post(create_test_alert))
}

async fn list_alerts(State(app_state): State<Arc<AppState>>) -> Json<Vec<Alert>> {
    Json(alert_service::list_alerts(&app_state.store).await)
}

async fn create_test_alert(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<TestAlertQuery>,
) -> (StatusCode, Json<Alert>) {
    let alert = alert_service::create_test_alert(
        &app_state.store,
        query.alert_type.as_deref(),
        app_state.template_chooser.as_ref(),
    )
    .await;
    (StatusCode::CREATED, Json(alert))
}
