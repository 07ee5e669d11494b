use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const OPENWEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Error)]
pub enum ExternalServiceError {
    #[error("weather request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },
    #[error("weather service answered with status {0}")]
    BadStatus(StatusCode),
    #[error("could not decode weather response: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
    #[error("weather response contained no conditions")]
    MissingConditions,
}

/// Current weather as returned by the API. Only the icon code is interpreted
/// here; the full payload is handed to the template as-is.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherSnapshot {
    pub icon: String,
    pub payload: Value,
}

impl WeatherSnapshot {
    pub fn city(&self) -> &str {
        self.payload.get("name").and_then(Value::as_str).unwrap_or("")
    }

    pub fn temperature(&self) -> String {
        self.payload
            .pointer("/main/temp")
            .and_then(Value::as_f64)
            .map(|t| format!("{t:.1}"))
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn description(&self) -> &str {
        self.payload
            .pointer("/weather/0/description")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

pub async fn fetch_weather(
    client: &Client,
    base_url: &str,
    city: &str,
    api_key: &str,
) -> Result<WeatherSnapshot, ExternalServiceError> {
    let response = client
        .get(base_url)
        .query(&[("q", city), ("units", "metric"), ("appid", api_key)])
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExternalServiceError::BadStatus(status));
    }
    let body = response.text().await?;
    let payload: Value = serde_json::from_str(&body)?;
    snapshot_from_payload(payload)
}

fn snapshot_from_payload(payload: Value) -> Result<WeatherSnapshot, ExternalServiceError> {
    let icon = payload
        .pointer("/weather/0/icon")
        .and_then(Value::as_str)
        .ok_or(ExternalServiceError::MissingConditions)?
        .to_string();
    Ok(WeatherSnapshot { icon, payload })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn icon_comes_from_first_condition() {
        let payload = json!({
            "name": "Toronto",
            "main": {"temp": 12.34},
            "weather": [
                {"icon": "04d", "description": "broken clouds"},
                {"icon": "10d", "description": "rain"}
            ]
        });
        let snapshot =
            snapshot_from_payload(payload.clone()).expect("payload with conditions should parse");
        assert_eq!(snapshot.icon, "04d");
        assert_eq!(snapshot.payload, payload);
    }

    #[test]
    fn empty_conditions_fail() {
        let result = snapshot_from_payload(json!({"weather": []}));
        assert!(matches!(
            result,
            Err(ExternalServiceError::MissingConditions)
        ));
    }

    #[test]
    fn missing_conditions_fail() {
        let result = snapshot_from_payload(json!({"name": "Toronto"}));
        assert!(matches!(
            result,
            Err(ExternalServiceError::MissingConditions)
        ));
    }

    #[test]
    fn display_accessors_read_the_payload() {
        let snapshot = snapshot_from_payload(json!({
            "name": "Toronto",
            "main": {"temp": -3.0},
            "weather": [{"icon": "13d", "description": "snow"}]
        }))
        .expect("payload with conditions should parse");
        assert_eq!(snapshot.city(), "Toronto");
        assert_eq!(snapshot.temperature(), "-3.0");
        assert_eq!(snapshot.description(), "snow");
    }

    #[test]
    fn display_accessors_tolerate_sparse_payloads() {
        let snapshot = snapshot_from_payload(json!({
            "weather": [{"icon": "01d"}]
        }))
        .expect("payload with conditions should parse");
        assert_eq!(snapshot.city(), "");
        assert_eq!(snapshot.temperature(), "?");
        assert_eq!(snapshot.description(), "");
    }
}
