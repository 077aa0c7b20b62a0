mod errors;
mod forward;
mod mqtt;
mod notify;

use std::env;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let mqtt_broker = env::var("MQTT_BROKER").unwrap_or_else(|_| "localhost".to_string());
    let mqtt_port: u16 = env::var("MQTT_PORT")
        .unwrap_or_else(|_| "1883".to_string())
        .parse()
        .unwrap_or(1883);
    let forward_topic = env::var("FORWARD_TOPIC").unwrap_or_default();

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting IoT Forwarder");
    info!("MQTT broker: {}:{}", mqtt_broker, mqtt_port);
    if forward_topic.is_empty() {
        error!("FORWARD_TOPIC is not set; events will be rejected until it is configured");
    } else {
        info!("Forward topic: {}", forward_topic);
    }

    // Generate client ID
    let client_id = format!("forwarder-{}", uuid::Uuid::new_v4());
    let forwarder_handle = tokio::spawn(async move {
        if let Err(e) = mqtt::run_forwarder(mqtt_broker, mqtt_port, client_id, forward_topic).await
        {
            error!("Forwarder task failed: {}", e);
        }
    });

    tokio::select! {
        _ = forwarder_handle => {
            error!("Forwarder task terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down");
}
