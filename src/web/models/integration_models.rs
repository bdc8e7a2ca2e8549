use serde::Deserialize;

// Body of PUT /api/integrations.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateIntegrationsRequest {
    pub slack: Option<IntegrationToggle>,
    pub email: Option<IntegrationToggle>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct IntegrationToggle {
    #[serde(default)]
    pub enabled: bool,
}
