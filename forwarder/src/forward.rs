use crate::notify::{Notification, Notifier};
use serde_json::{json, Value};
use tracing::{error, info, warn};

/// Fixed subject used for every forwarded event
const FORWARD_SUBJECT: &str = "IoT Alert";

/// Invocation result for the passthrough path
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardResponse {
    pub status_code: u16,
    pub body: String,
}

impl ForwardResponse {
    fn ok(body: String) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    fn failed(body: &str) -> Self {
        Self {
            status_code: 500,
            body: body.to_string(),
        }
    }
}

/// Forwards any inbound event verbatim as a notification, with no
/// evaluation logic. Transport failures are caught and reported in the
/// response, never propagated.
pub async fn forward_event(
    event: &Value,
    forward_topic: &str,
    notifier: &impl Notifier,
) -> ForwardResponse {
    if forward_topic.is_empty() {
        warn!("FORWARD_TOPIC is not set; skipping publish");
        return ForwardResponse::failed("FORWARD_TOPIC not configured");
    }

    let pretty = serde_json::to_string_pretty(event).unwrap_or_else(|_| event.to_string());
    let notification = Notification {
        subject: FORWARD_SUBJECT.to_string(),
        body: format!("IoT Alert received:\n\n{}", pretty),
    };

    match notifier.send(forward_topic, &notification).await {
        Ok(ack) => {
            info!("Notification published, message id {}", ack.message_id);
            ForwardResponse::ok(json!({ "messageId": ack.message_id }).to_string())
        }
        Err(e) => {
            error!("Error publishing notification: {}", e);
            ForwardResponse::failed("Error publishing notification")
        }
    }
}
