use serde::Serialize;

use crate::store::MemoryStore;
use crate::store::models::{Alert, Monitor};

pub const RECENT_ALERT_LIMIT: usize = 10;

/// Everything the dashboard template needs.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub monitors: Vec<Monitor>,
    pub recent_alerts: Vec<Alert>,
    pub integrations_config: IntegrationsConfig,
}

#[derive(Debug, Serialize)]
pub struct IntegrationsConfig {
    pub slack: ChannelState,
    pub email: ChannelState,
}

#[derive(Debug, Serialize)]
pub struct ChannelState {
    pub enabled: bool,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            slack: ChannelState { enabled: true },
            email: ChannelState { enabled: true },
        }
    }
}

/// Newest alerts first, at most `limit`. The sort is stable, so alerts with
/// equal timestamps keep their insertion order.
pub fn recent_alerts(alerts: &[Alert], limit: usize) -> Vec<Alert> {
    let mut sorted = alerts.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(limit);
    sorted
}

pub async fn build_dashboard(store: &MemoryStore) -> DashboardView {
    let state = store.lock().await;
    DashboardView {
        monitors: state.monitors.clone(),
        recent_alerts: recent_alerts(&state.alerts, RECENT_ALERT_LIMIT),
        integrations_config: IntegrationsConfig::default(),
    }
}
