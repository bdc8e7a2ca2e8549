use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

use crate::services::monitor_service;
use crate::store::models::Monitor;
use crate::web::extract::LenientJson;
use crate::web::models::monitor_models::{CreateMonitor, UpdateMonitor};
use crate::web::{AppError, AppState};

pub fn create_monitor_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_monitors).post(create_monitor))
        .route("/{id}", get(get_monitor).put(update_monitor))
}

/// Any id segment that cannot name a stored monitor is reported as not found.
fn parse_monitor_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>().map_err(|_| AppError::monitor_not_found())
}

async fn list_monitors(State(app_state): State<Arc<AppState>>) -> Json<Vec<Monitor>> {
    Json(monitor_service::list_monitors(&app_state.store).await)
}

async fn create_monitor(
    State(app_state): State<Arc<AppState>>,
    LenientJson(payload): LenientJson<CreateMonitor>,
) -> (StatusCode, Json<Monitor>) {
    let monitor = monitor_service::create_monitor(&app_state.store, payload).await;
    (StatusCode::CREATED, Json(monitor))
}

async fn get_monitor(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Monitor>, AppError> {
    let id = parse_monitor_id(&id)?;
    let monitor = monitor_service::get_monitor(&app_state.store, id).await?;
    Ok(Json(monitor))
}

async fn update_monitor(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    LenientJson(payload): LenientJson<UpdateMonitor>,
) -> Result<Json<Monitor>, AppError> {
    let id = parse_monitor_id(&id)?;
    let monitor = monitor_service::update_monitor(&app_state.store, id, payload).await?;
    Ok(Json(monitor))
}
