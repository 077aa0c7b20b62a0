use crate::errors::{Error, Result};
use crate::forward::forward_event;
use crate::notify::MqttNotifier;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use serde_json::Value;
use tracing::{error, info, warn};

/// Inbound telemetry subscription
const EVENTS_TOPIC: &str = "telemetry/#";

pub async fn run_forwarder(
    broker: String,
    port: u16,
    client_id: String,
    forward_topic: String,
) -> Result<()> {
    info!("Connecting to MQTT broker at {}:{}", broker, port);

    let mut mqtt_options = MqttOptions::new(client_id, broker, port);
    mqtt_options.set_keep_alive(std::time::Duration::from_secs(30));
    mqtt_options.set_clean_session(false);

    let (client, mut eventloop) = AsyncClient::new(mqtt_options, 100);
    let notifier = MqttNotifier::new(client.clone());

    client
        .subscribe(EVENTS_TOPIC, QoS::AtLeastOnce)
        .await
        .map_err(Error::Mqtt)?;

    info!("Subscribed to {} with QoS 1", EVENTS_TOPIC);

    loop {
        match eventloop.poll().await {
            Ok(notification) => {
                if let Event::Incoming(Packet::Publish(publish)) = notification {
                    let event = match serde_json::from_slice::<Value>(&publish.payload) {
                        Ok(event) => event,
                        Err(e) => {
                            warn!("Discarding unparseable event on {}: {}", publish.topic, e);
                            continue;
                        }
                    };

                    info!("Received event: {}", event);

                    let response = forward_event(&event, &forward_topic, &notifier).await;
                    if response.status_code == 200 {
                        info!("Forwarded event: {}", response.body);
                    } else {
                        error!("Forwarding failed: {}", response.body);
                    }
                }
            }
            Err(e) => {
                error!("MQTT error: {}", e);
                // rumqttc automatically reconnects, so we just log and continue
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        }
    }
}
