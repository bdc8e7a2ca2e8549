use axum::{extract::State, response::Html};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::services::dashboard_service;
use crate::web::{AppError, AppState};

pub const DASHBOARD_TEMPLATE: &str = "index.html";

#[derive(RustEmbed)]
#[folder = "templates"]
struct TemplateAssets;

/// Parses every embedded template once. `.html` templates are autoescaped.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    for name in TemplateAssets::iter() {
        let file = TemplateAssets::get(&name)
            .ok_or_else(|| tera::Error::msg(format!("Embedded template {name} disappeared")))?;
        let source = std::str::from_utf8(&file.data)
            .map_err(|e| tera::Error::msg(format!("Template {name} is not valid UTF-8: {e}")))?;
        tera.add_raw_template(&name, source)?;
    }
    Ok(tera)
}

pub async fn dashboard_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let view = dashboard_service::build_dashboard(&app_state.store).await;
    let context = Context::from_serialize(&view)?;
    let html = app_state.templates.render(DASHBOARD_TEMPLATE, &context)?;
    Ok(Html(html))
}
