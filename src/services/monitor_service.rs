use chrono::Utc;
use serde_json::Number;
use tracing::info;

use crate::store::MemoryStore;
use crate::store::models::{
    AnomalyDetection, AvailabilityMonitoring, DataQualityMonitoring, EmailIntegration,
    Integrations, Monitor, SlackIntegration, DEFAULT_ANOMALY_CHECKS, DEFAULT_FIELDS_MONITORED,
    DEFAULT_NULL_THRESHOLD_PERCENT,
};
use crate::web::error::AppError;
use crate::web::models::monitor_models::{
    AnomalyPatch, AvailabilityPatch, CreateMonitor, DataQualityPatch, IntegrationsPatch,
    UpdateMonitor,
};

pub async fn list_monitors(store: &MemoryStore) -> Vec<Monitor> {
    store.lock().await.monitors.clone()
}

pub async fn get_monitor(store: &MemoryStore, id: i32) -> Result<Monitor, AppError> {
    store
        .lock()
        .await
        .monitor(id)
        .cloned()
        .ok_or_else(AppError::monitor_not_found)
}

pub async fn create_monitor(store: &MemoryStore, payload: CreateMonitor) -> Monitor {
    let mut state = store.lock().await;
    let now = Utc::now();

    let monitor = Monitor {
        id: state.next_monitor_id(),
        name: payload.name.unwrap_or_default(),
        api_endpoint: payload.api_endpoint.unwrap_or_default(),
        status: "healthy".to_string(),
        last_check: now,
        availability_monitoring: AvailabilityMonitoring {
            enabled: payload.availability_enabled.unwrap_or(true),
            threshold_minutes: payload.threshold_minutes.unwrap_or(5),
            last_incident: None,
            history: Vec::new(),
        },
        data_quality_monitoring: DataQualityMonitoring {
            enabled: payload.data_quality_enabled.unwrap_or(true),
            null_threshold_percent: payload
                .null_threshold_percent
                .unwrap_or_else(|| Number::from(DEFAULT_NULL_THRESHOLD_PERCENT)),
            fields_monitored: payload
                .fields_monitored
                .unwrap_or_else(|| to_strings(&DEFAULT_FIELDS_MONITORED)),
            current_null_rate: 0.0,
            history: Vec::new(),
        },
        anomaly_detection: AnomalyDetection {
            enabled: payload.anomaly_enabled.unwrap_or(true),
            checks: payload
                .anomaly_checks
                .unwrap_or_else(|| to_strings(&DEFAULT_ANOMALY_CHECKS)),
            recent_anomalies: Vec::new(),
            history: Vec::new(),
        },
        integrations: Integrations {
            slack: SlackIntegration {
                enabled: payload.slack_enabled.unwrap_or(true),
                webhook_url: payload.slack_webhook.unwrap_or_default(),
            },
            email: EmailIntegration {
                enabled: payload.email_enabled.unwrap_or(true),
                recipients: payload.email_recipients.unwrap_or_default(),
            },
        },
        created_at: now,
    };

    state.monitors.push(monitor.clone());
    info!(monitor_id = monitor.id, name = %monitor.name, "Created monitor.");
    monitor
}

/// Shallow-merges each sub-object present in `payload` into the stored monitor.
pub async fn update_monitor(
    store: &MemoryStore,
    id: i32,
    payload: UpdateMonitor,
) -> Result<Monitor, AppError> {
    let mut state = store.lock().await;
    let monitor = state.monitor_mut(id).ok_or_else(AppError::monitor_not_found)?;

    if let Some(patch) = payload.integrations {
        merge_integrations(&mut monitor.integrations, patch);
    }
    if let Some(patch) = payload.availability_monitoring {
        merge_availability(&mut monitor.availability_monitoring, patch);
    }
    if let Some(patch) = payload.data_quality_monitoring {
        merge_data_quality(&mut monitor.data_quality_monitoring, patch);
    }
    if let Some(patch) = payload.anomaly_detection {
        merge_anomaly(&mut monitor.anomaly_detection, patch);
    }

    info!(monitor_id = id, "Updated monitor.");
    Ok(monitor.clone())
}

fn merge_integrations(target: &mut Integrations, patch: IntegrationsPatch) {
    if let Some(slack) = patch.slack {
        target.slack = slack;
    }
    if let Some(email) = patch.email {
        target.email = email;
    }
}

fn merge_availability(target: &mut AvailabilityMonitoring, patch: AvailabilityPatch) {
    if let Some(enabled) = patch.enabled {
        target.enabled = enabled;
    }
    if let Some(threshold) = patch.threshold_minutes {
        target.threshold_minutes = threshold;
    }
    if let Some(last_incident) = patch.last_incident {
        target.last_incident = last_incident;
    }
    if let Some(history) = patch.history {
        target.history = history;
    }
}

fn merge_data_quality(target: &mut DataQualityMonitoring, patch: DataQualityPatch) {
    if let Some(enabled) = patch.enabled {
        target.enabled = enabled;
    }
    if let Some(threshold) = patch.null_threshold_percent {
        target.null_threshold_percent = threshold;
    }
    if let Some(fields) = patch.fields_monitored {
        target.fields_monitored = fields;
    }
    if let Some(rate) = patch.current_null_rate {
        target.current_null_rate = rate;
    }
    if let Some(history) = patch.history {
        target.history = history;
    }
}

fn merge_anomaly(target: &mut AnomalyDetection, patch: AnomalyPatch) {
    if let Some(enabled) = patch.enabled {
        target.enabled = enabled;
    }
    if let Some(checks) = patch.checks {
        target.checks = checks;
    }
    if let Some(recent) = patch.recent_anomalies {
        target.recent_anomalies = recent;
    }
    if let Some(history) = patch.history {
        target.history = history;
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
