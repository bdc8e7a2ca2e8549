use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

pub const DEFAULT_FIELDS_MONITORED: [&str; 4] = ["price", "inventory", "shipping_fee", "edd"];

pub const DEFAULT_NULL_THRESHOLD_PERCENT: u64 = 10;

pub const DEFAULT_ANOMALY_CHECKS: [&str; 5] = [
    "price_spikes",
    "shipping_fee_anomalies",
    "past_edds",
    "inventory_drops",
    "shipping_fluctuations",
];

/// A tracked third-party API integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: i32,
    pub name: String,
    pub api_endpoint: String,
    pub status: String,
    pub last_check: DateTime<Utc>,
    pub availability_monitoring: AvailabilityMonitoring,
    pub data_quality_monitoring: DataQualityMonitoring,
    pub anomaly_detection: AnomalyDetection,
    pub integrations: Integrations,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityMonitoring {
    pub enabled: bool,
    pub threshold_minutes: i64,
    pub last_incident: Option<Alert>,
    pub history: Vec<Alert>, // newest first
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityMonitoring {
    pub enabled: bool,
    pub null_threshold_percent: Number, // keeps integer input as integer
    pub fields_monitored: Vec<String>,
    pub current_null_rate: f64,
    pub history: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyDetection {
    pub enabled: bool,
    pub checks: Vec<String>,
    pub recent_anomalies: Vec<Alert>,
    pub history: Vec<Alert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Integrations {
    pub slack: SlackIntegration,
    pub email: EmailIntegration,
}

/// Missing fields take their zero value so a partial `slack` object still
/// replaces the whole sub-object on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackIntegration {
    pub enabled: bool,
    pub webhook_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailIntegration {
    pub enabled: bool,
    pub recipients: Vec<String>,
}

/// Monitoring category an alert belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Availability,
    DataQuality,
    Anomaly,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [
        AlertKind::Availability,
        AlertKind::DataQuality,
        AlertKind::Anomaly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Availability => "availability",
            AlertKind::DataQuality => "data_quality",
            AlertKind::Anomaly => "anomaly",
        }
    }

    /// Case-insensitive lookup; anything unrecognised yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "availability" => Some(AlertKind::Availability),
            "data_quality" => Some(AlertKind::DataQuality),
            "anomaly" => Some(AlertKind::Anomaly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i32,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub alert_type: AlertKind,
    pub severity: String,
    pub title: String,
    pub message: String,
    pub monitor_id: i32, // not checked against the monitor store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kind_parse_is_case_insensitive() {
        assert_eq!(AlertKind::parse("Anomaly"), Some(AlertKind::Anomaly));
        assert_eq!(AlertKind::parse("DATA_QUALITY"), Some(AlertKind::DataQuality));
        assert_eq!(AlertKind::parse("availability"), Some(AlertKind::Availability));
        assert_eq!(AlertKind::parse("data-quality"), None);
        assert_eq!(AlertKind::parse(""), None);
    }

    #[test]
    fn test_alert_serializes_kind_under_type_key() {
        let alert = Alert {
            id: 1,
            timestamp: Utc::now(),
            alert_type: AlertKind::DataQuality,
            severity: "warning".to_string(),
            title: "t".to_string(),
            message: "m".to_string(),
            monitor_id: 1,
        };

        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["type"], "data_quality");
        assert!(value.get("alert_type").is_none());
    }

    #[test]
    fn test_partial_slack_object_fills_zero_values() {
        let slack: SlackIntegration = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert!(slack.enabled);
        assert_eq!(slack.webhook_url, "");
    }
}
