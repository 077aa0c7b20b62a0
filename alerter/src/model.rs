use serde::Serialize;

/// Sentinel device identifier used when an event carries none.
pub const UNKNOWN_DEVICE: &str = "unknown-device";

/// Normalized device reading extracted from an inbound event
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub device_id: String,
    pub temperature: Option<f64>,
}

/// Acceptable temperature bounds, loaded once at startup
#[derive(Debug, Clone, Copy)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// Handler result returned for every processed event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    NoTemperature,
    #[serde(rename = "ok")]
    WithinRange { temperature: f64 },
    AlertSent { temperature: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_status_tags() {
        let no_temp = serde_json::to_value(&Outcome::NoTemperature).unwrap();
        assert_eq!(no_temp["status"], "no-temperature");

        let ok = serde_json::to_value(&Outcome::WithinRange { temperature: 30.0 }).unwrap();
        assert_eq!(ok["status"], "ok");
        assert_eq!(ok["temperature"], 30.0);

        let alert = serde_json::to_value(&Outcome::AlertSent { temperature: 42.5 }).unwrap();
        assert_eq!(alert["status"], "alert-sent");
        assert_eq!(alert["temperature"], 42.5);
    }
}
