use tracing::info;

use crate::store::MemoryStore;
use crate::web::models::integration_models::UpdateIntegrationsRequest;

/// Applies the global Slack/email toggles to every monitor. Webhook URLs and
/// recipient lists are left alone. Returns how many monitors were touched.
pub async fn update_integrations(store: &MemoryStore, payload: &UpdateIntegrationsRequest) -> usize {
    let mut state = store.lock().await;

    for monitor in state.monitors.iter_mut() {
        if let Some(slack) = payload.slack {
            monitor.integrations.slack.enabled = slack.enabled;
        }
        if let Some(email) = payload.email {
            monitor.integrations.email.enabled = email.enabled;
        }
    }

    let count = state.monitors.len();
    info!(
        monitors = count,
        slack = ?payload.slack.map(|s| s.enabled),
        email = ?payload.email.map(|e| e.enabled),
        "Updated integration settings."
    );
    count
}
