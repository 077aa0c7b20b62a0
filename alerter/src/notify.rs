use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use rumqttc::{AsyncClient, QoS};
use serde::Serialize;

/// Human-readable alert message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Transport acknowledgement for a sent notification
#[derive(Debug, Clone)]
pub struct Ack {
    pub message_id: String,
}

/// Publish-capable notification transport
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn send(&self, destination: &str, notification: &Notification) -> Result<Ack>;
}

/// Wire format published to the destination topic
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundMessage<'a> {
    message_id: &'a str,
    timestamp: DateTime<Utc>,
    subject: &'a str,
    message: &'a str,
}

/// Notifier backed by the shared MQTT client
#[derive(Clone)]
pub struct MqttNotifier {
    client: AsyncClient,
}

impl MqttNotifier {
    pub fn new(client: AsyncClient) -> Self {
        Self { client }
    }
}

impl Notifier for MqttNotifier {
    async fn send(&self, destination: &str, notification: &Notification) -> Result<Ack> {
        if destination.is_empty() {
            return Err(Error::Config(
                "notification topic is not configured".to_string(),
            ));
        }

        let message_id = uuid::Uuid::new_v4().to_string();
        let payload = serde_json::to_vec(&OutboundMessage {
            message_id: &message_id,
            timestamp: Utc::now(),
            subject: &notification.subject,
            message: &notification.body,
        })?;

        self.client
            .publish(destination, QoS::AtLeastOnce, false, payload)
            .await
            .map_err(Error::Mqtt)?;

        Ok(Ack { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rumqttc::MqttOptions;

    #[test]
    fn test_empty_destination_is_a_config_error() {
        tokio_test::block_on(async {
            let options = MqttOptions::new("test", "localhost", 1883);
            let (client, _eventloop) = AsyncClient::new(options, 10);
            let notifier = MqttNotifier::new(client);

            let notification = Notification {
                subject: "subject".to_string(),
                body: "body".to_string(),
            };

            let result = notifier.send("", &notification).await;
            assert!(matches!(result, Err(Error::Config(_))));
        });
    }
}
