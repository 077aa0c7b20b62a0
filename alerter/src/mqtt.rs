use crate::errors::{Error, Result};
use crate::handler::handle_event;
use crate::model::Range;
use crate::notify::MqttNotifier;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use serde_json::Value;
use tracing::{error, info, warn};

/// Inbound telemetry subscription
const EVENTS_TOPIC: &str = "telemetry/#";

pub async fn run_relay(
    broker: String,
    port: u16,
    client_id: String,
    range: Range,
    alert_topic: String,
    service_name: String,
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

                    // Transport failures surface here as handler faults
                    match handle_event(&event, &range, &alert_topic, &service_name, &notifier)
                        .await
                    {
                        Ok(outcome) => match serde_json::to_string(&outcome) {
                            Ok(status) => info!("Handler outcome: {}", status),
                            Err(e) => error!("Failed to encode outcome: {}", e),
                        },
                        Err(e) => error!("Alert handler failed: {}", e),
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
