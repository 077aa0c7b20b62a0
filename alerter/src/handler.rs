use crate::errors::Result;
use crate::model::{Outcome, Range};
use crate::normalize::normalize;
use crate::notify::{Notification, Notifier};
use serde_json::Value;
use tracing::info;

/// Subject line limit imposed by downstream notification transports
const MAX_SUBJECT_LEN: usize = 100;

/// Evaluates a single inbound event against the configured range and
/// publishes an alert when the temperature falls outside it.
///
/// A transport failure is not caught here; it propagates to the event
/// loop as a handler fault.
pub async fn handle_event(
    event: &Value,
    range: &Range,
    alert_topic: &str,
    service_name: &str,
    notifier: &impl Notifier,
) -> Result<Outcome> {
    let reading = normalize(event);

    let Some(temperature) = reading.temperature else {
        info!("No temperature found in event; nothing to do");
        return Ok(Outcome::NoTemperature);
    };

    info!("Device {} temperature: {}", reading.device_id, temperature);

    if temperature < range.min || temperature > range.max {
        let notification = alert_notification(&reading.device_id, temperature, range, service_name);
        let ack = notifier.send(alert_topic, &notification).await?;

        info!("Alert published, message id {}", ack.message_id);
        Ok(Outcome::AlertSent { temperature })
    } else {
        info!("Temperature within normal range; no alert");
        Ok(Outcome::WithinRange { temperature })
    }
}

fn alert_notification(
    device_id: &str,
    temperature: f64,
    range: &Range,
    service_name: &str,
) -> Notification {
    let subject = format!(
        "IoT ALERT: {} temp {:.2}°C out of range",
        device_id, temperature
    );

    let body = format!(
        "Device ID: {}\n\
         Temperature: {:.2} °C\n\
         Expected range: {} - {} °C\n\
         Environment: {}",
        device_id, temperature, range.min, range.max, service_name
    );

    Notification {
        subject: truncate_subject(subject),
        body,
    }
}

fn truncate_subject(subject: String) -> String {
    if subject.chars().count() <= MAX_SUBJECT_LEN {
        subject
    } else {
        subject.chars().take(MAX_SUBJECT_LEN).collect()
    }
}
