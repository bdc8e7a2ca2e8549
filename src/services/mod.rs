pub mod alert_service;
pub mod dashboard_service;
pub mod integration_service;
pub mod monitor_service;

#[cfg(test)]
pub(crate) mod test_support;
