pub mod alert_models;
pub mod integration_models;
pub mod monitor_models;
