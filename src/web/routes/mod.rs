pub mod alert_routes;
pub mod integration_routes;
pub mod monitor_routes;
