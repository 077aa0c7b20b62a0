use crate::model::{Reading, UNKNOWN_DEVICE};
use serde_json::Value;

/// Extracts a device id and temperature from a loosely-structured event.
///
/// Events arrive in one of several shapes: flat
/// `{"deviceId": ..., "temperature": ...}` fields, or a `payload` field
/// holding a JSON-encoded string with the same fields nested inside.
/// Malformed input of any kind degrades to a Reading without a
/// temperature; this never fails.
pub fn normalize(event: &Value) -> Reading {
    let mut device_id = event
        .get("deviceId")
        .and_then(Value::as_str)
        .or_else(|| event.get("device_id").and_then(Value::as_str))
        .unwrap_or(UNKNOWN_DEVICE)
        .to_string();

    let mut temperature = None;

    if let Some(value) = event.get("temperature") {
        temperature = coerce_number(value);
    } else if let Some(raw) = event.get("payload").and_then(Value::as_str) {
        // payload can be a JSON string; parse failures are swallowed
        if let Ok(nested) = serde_json::from_str::<Value>(raw) {
            if let Some(id) = nested.get("deviceId").and_then(Value::as_str) {
                device_id = id.to_string();
            }
            temperature = nested.get("temperature").and_then(coerce_number);
        }
    }

    Reading {
        device_id,
        temperature,
    }
}

/// Best-effort numeric coercion: JSON numbers directly, strings via a
/// float parse. Anything else yields no value.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_event() {
        let event = json!({"deviceId": "sensor-1", "temperature": 42.5});
        let reading = normalize(&event);

        assert_eq!(reading.device_id, "sensor-1");
        assert_eq!(reading.temperature, Some(42.5));
    }

    #[test]
    fn test_snake_case_device_id() {
        let event = json!({"device_id": "sensor-2", "temperature": 21});
        let reading = normalize(&event);

        assert_eq!(reading.device_id, "sensor-2");
        assert_eq!(reading.temperature, Some(21.0));
    }

    #[test]
    fn test_string_temperature() {
        let event = json!({"deviceId": "sensor-1", "temperature": "36.6"});
        let reading = normalize(&event);

        assert_eq!(reading.temperature, Some(36.6));
    }

    #[test]
    fn test_unparseable_temperature() {
        let event = json!({"deviceId": "sensor-1", "temperature": "hot"});
        let reading = normalize(&event);

        assert_eq!(reading.temperature, None);
    }

    #[test]
    fn test_missing_device_id_uses_sentinel() {
        let event = json!({"temperature": 30.0});
        let reading = normalize(&event);

        assert_eq!(reading.device_id, UNKNOWN_DEVICE);
    }

    #[test]
    fn test_nested_payload() {
        let event = json!({"payload": "{\"deviceId\":\"d1\",\"temperature\":50}"});
        let reading = normalize(&event);

        assert_eq!(reading.device_id, "d1");
        assert_eq!(reading.temperature, Some(50.0));
    }

    #[test]
    fn test_nested_payload_keeps_outer_device_id() {
        let event = json!({"deviceId": "outer", "payload": "{\"temperature\":12.5}"});
        let reading = normalize(&event);

        assert_eq!(reading.device_id, "outer");
        assert_eq!(reading.temperature, Some(12.5));
    }

    #[test]
    fn test_malformed_payload_is_swallowed() {
        let event = json!({"deviceId": "sensor-1", "payload": "not json"});
        let reading = normalize(&event);

        assert_eq!(reading.device_id, "sensor-1");
        assert_eq!(reading.temperature, None);
    }

    #[test]
    fn test_top_level_temperature_wins_over_payload() {
        // presence of the key short-circuits, even when coercion fails
        let event = json!({
            "temperature": true,
            "payload": "{\"temperature\":99}"
        });
        let reading = normalize(&event);

        assert_eq!(reading.temperature, None);
    }

    #[test]
    fn test_empty_event() {
        let event = json!({});
        let reading = normalize(&event);

        assert_eq!(reading.device_id, UNKNOWN_DEVICE);
        assert_eq!(reading.temperature, None);
    }
}
