use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::store::MemoryStore;
use crate::store::models::{Alert, AlertKind};

/// Canned content for a demonstration alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertTemplate {
    pub alert_type: AlertKind,
    pub severity: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub monitor_id: i32,
}

pub const ALERT_TEMPLATES: [AlertTemplate; 3] = [
    AlertTemplate {
        alert_type: AlertKind::Availability,
        severity: "critical",
        title: "API Unresponsive",
        message: "Wayfair API has not responded for 6 minutes",
        monitor_id: 1,
    },
    AlertTemplate {
        alert_type: AlertKind::DataQuality,
        severity: "warning",
        title: "High Null Rate Detected",
        message: "15% of responses missing price field (threshold: 10%)",
        monitor_id: 1,
    },
    AlertTemplate {
        alert_type: AlertKind::Anomaly,
        severity: "warning",
        title: "Price Spike Detected",
        message: "Product #12345 price increased 300% in last hour",
        monitor_id: 1,
    },
];

impl AlertTemplate {
    pub fn for_kind(kind: AlertKind) -> &'static AlertTemplate {
        match kind {
            AlertKind::Availability => &ALERT_TEMPLATES[0],
            AlertKind::DataQuality => &ALERT_TEMPLATES[1],
            AlertKind::Anomaly => &ALERT_TEMPLATES[2],
        }
    }
}

/// Picks a template index when the caller did not name an alert type.
pub trait TemplateChooser: Send + Sync {
    /// Returns an index in `0..count`.
    fn choose(&self, count: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl TemplateChooser for RandomChooser {
    fn choose(&self, count: usize) -> usize {
        rand::rng().random_range(0..count)
    }
}

pub async fn list_alerts(store: &MemoryStore) -> Vec<Alert> {
    store.lock().await.alerts.clone()
}

/// Raises a canned alert and records it in the owning monitor's history.
///
/// `requested_type` is matched case-insensitively; anything else (or nothing)
/// falls back to `chooser`.
pub async fn create_test_alert(
    store: &MemoryStore,
    requested_type: Option<&str>,
    chooser: &dyn TemplateChooser,
) -> Alert {
    let template = match requested_type.and_then(AlertKind::parse) {
        Some(kind) => AlertTemplate::for_kind(kind),
        None => {
            let index = chooser.choose(ALERT_TEMPLATES.len()).min(ALERT_TEMPLATES.len() - 1);
            &ALERT_TEMPLATES[index]
        }
    };

    let mut state = store.lock().await;
    let alert = Alert {
        id: state.next_alert_id(),
        timestamp: Utc::now(),
        alert_type: template.alert_type,
        severity: template.severity.to_string(),
        title: template.title.to_string(),
        message: template.message.to_string(),
        monitor_id: template.monitor_id,
    };
    state.alerts.push(alert.clone());

    match state.monitor_mut(alert.monitor_id) {
        Some(monitor) => match alert.alert_type {
            AlertKind::Availability => {
                let availability = &mut monitor.availability_monitoring;
                availability.history.insert(0, alert.clone());
                availability.last_incident = Some(alert.clone());
            }
            AlertKind::DataQuality => {
                monitor.data_quality_monitoring.history.insert(0, alert.clone());
            }
            AlertKind::Anomaly => {
                monitor.anomaly_detection.history.insert(0, alert.clone());
            }
        },
        None => {
            debug!(
                monitor_id = alert.monitor_id,
                alert_id = alert.id,
                "Alert references an unknown monitor; history not updated."
            );
        }
    }

    info!(
        alert_id = alert.id,
        alert_type = alert.alert_type.as_str(),
        monitor_id = alert.monitor_id,
        "Created test alert."
    );
    alert
}
