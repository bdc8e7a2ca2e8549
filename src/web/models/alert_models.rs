use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct TestAlertQuery {
    #[serde(rename = "type")]
    pub alert_type: Option<String>,
}
