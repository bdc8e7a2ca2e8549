use chrono::{DateTime, Duration, Utc};
use serde_json::Number;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

pub mod models;

use models::{
    Alert, AnomalyDetection, AvailabilityMonitoring, DataQualityMonitoring, EmailIntegration,
    Integrations, Monitor, SlackIntegration, DEFAULT_ANOMALY_CHECKS, DEFAULT_FIELDS_MONITORED,
    DEFAULT_NULL_THRESHOLD_PERCENT,
};

/// Both in-memory collections. Nothing here is ever deleted.
#[derive(Debug, Default)]
pub struct StoreState {
    pub monitors: Vec<Monitor>,
    pub alerts: Vec<Alert>,
}

impl StoreState {
    pub fn monitor(&self, id: i32) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.id == id)
    }

    pub fn monitor_mut(&mut self, id: i32) -> Option<&mut Monitor> {
        self.monitors.iter_mut().find(|m| m.id == id)
    }

    pub fn next_monitor_id(&self) -> i32 {
        self.monitors.len() as i32 + 1
    }

    pub fn next_alert_id(&self) -> i32 {
        self.alerts.len() as i32 + 1
    }
}

/// Cloneable handle to the process-wide store. Every operation holds the
/// lock for its whole read/modify cycle.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new(state: StoreState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Store holding the single demo monitor and no alerts.
    pub fn seeded() -> Self {
        Self::new(StoreState {
            monitors: vec![seed_monitor(Utc::now())],
            alerts: Vec::new(),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().await
    }
}

fn seed_monitor(now: DateTime<Utc>) -> Monitor {
    Monitor {
        id: 1,
        name: "Wayfair API".to_string(),
        api_endpoint: "https://api.wayfair.com/v1/products".to_string(),
        status: "healthy".to_string(),
        last_check: now - Duration::minutes(2),
        availability_monitoring: AvailabilityMonitoring {
            enabled: true,
            threshold_minutes: 5,
            last_incident: None,
            history: Vec::new(),
        },
        data_quality_monitoring: DataQualityMonitoring {
            enabled: true,
            null_threshold_percent: Number::from(DEFAULT_NULL_THRESHOLD_PERCENT),
            fields_monitored: DEFAULT_FIELDS_MONITORED.iter().map(|f| f.to_string()).collect(),
            current_null_rate: 2.3,
            history: Vec::new(),
        },
        anomaly_detection: AnomalyDetection {
            enabled: true,
            checks: DEFAULT_ANOMALY_CHECKS.iter().map(|c| c.to_string()).collect(),
            recent_anomalies: Vec::new(),
            history: Vec::new(),
        },
        integrations: Integrations {
            slack: SlackIntegration {
                enabled: true,
                webhook_url: "https://hooks.slack.com/services/...".to_string(),
            },
            email: EmailIntegration {
                enabled: true,
                recipients: vec!["eng@minoan.com".to_string(), "ops@minoan.com".to_string()],
            },
        },
        created_at: now - Duration::days(7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store_has_single_demo_monitor() {
        let store = MemoryStore::seeded();
        let state = store.lock().await;

        assert_eq!(state.monitors.len(), 1);
        assert_eq!(state.monitors[0].id, 1);
        assert_eq!(state.monitors[0].name, "Wayfair API");
        assert!(state.alerts.is_empty());
        assert_eq!(state.next_monitor_id(), 2);
        assert_eq!(state.next_alert_id(), 1);
    }

    #[test]
    fn test_seed_timestamps_are_in_the_past() {
        let now = Utc::now();
        let monitor = seed_monitor(now);

        assert_eq!(now - monitor.last_check, Duration::minutes(2));
        assert_eq!(now - monitor.created_at, Duration::days(7));
        assert_eq!(monitor.data_quality_monitoring.current_null_rate, 2.3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.lock().await.monitors.push(seed_monitor(Utc::now()));

        assert!(other.lock().await.monitor(1).is_some());
        assert!(other.lock().await.monitor(2).is_none());
    }
}
