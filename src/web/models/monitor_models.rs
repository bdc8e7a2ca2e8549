use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::store::models::{Alert, EmailIntegration, SlackIntegration};

// Request body for POST /api/monitors. Every field falls back to a default.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateMonitor {
    pub name: Option<String>,
    pub api_endpoint: Option<String>,
    pub availability_enabled: Option<bool>,
    pub threshold_minutes: Option<i64>,
    pub data_quality_enabled: Option<bool>,
    pub null_threshold_percent: Option<Number>,
    pub fields_monitored: Option<Vec<String>>,
    pub anomaly_enabled: Option<bool>,
    pub anomaly_checks: Option<Vec<String>>,
    pub slack_enabled: Option<bool>,
    pub slack_webhook: Option<String>,
    pub email_enabled: Option<bool>,
    pub email_recipients: Option<Vec<String>>,
}

// Request body for PUT /api/monitors/{id}. Only the sub-objects present are merged.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateMonitor {
    pub integrations: Option<IntegrationsPatch>,
    pub availability_monitoring: Option<AvailabilityPatch>,
    pub data_quality_monitoring: Option<DataQualityPatch>,
    pub anomaly_detection: Option<AnomalyPatch>,
}

/// `slack` and `email` replace the stored objects wholesale.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct IntegrationsPatch {
    pub slack: Option<SlackIntegration>,
    pub email: Option<EmailIntegration>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AvailabilityPatch {
    pub enabled: Option<bool>,
    pub threshold_minutes: Option<i64>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub last_incident: Option<Option<Alert>>, // Some(None) clears it
    pub history: Option<Vec<Alert>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DataQualityPatch {
    pub enabled: Option<bool>,
    pub null_threshold_percent: Option<Number>,
    pub fields_monitored: Option<Vec<String>>,
    pub current_null_rate: Option<f64>,
    pub history: Option<Vec<Alert>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AnomalyPatch {
    pub enabled: Option<bool>,
    pub checks: Option<Vec<String>>,
    pub recent_anomalies: Option<Vec<Alert>>,
    pub history: Option<Vec<Alert>>,
}

/// Distinguishes a key given as `null` from a missing key.
fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
