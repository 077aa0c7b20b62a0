mod errors;
mod handler;
mod model;
mod mqtt;
mod normalize;
mod notify;

use model::Range;
use std::env;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let mqtt_broker = env::var("MQTT_BROKER").unwrap_or_else(|_| "localhost".to_string());
    let mqtt_port: u16 = env::var("MQTT_PORT")
        .unwrap_or_else(|_| "1883".to_string())
        .parse()
        .unwrap_or(1883);
    let alert_topic = env::var("ALERT_TOPIC").unwrap_or_default();
    let min_temp: f64 = env::var("MIN_TEMP")
        .unwrap_or_else(|_| "25".to_string())
        .parse()
        .unwrap_or(25.0);
    let max_temp: f64 = env::var("MAX_TEMP")
        .unwrap_or_else(|_| "40".to_string())
        .parse()
        .unwrap_or(40.0);
    let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "iot-alerter".to_string());

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting IoT Alerter");
    info!("MQTT broker: {}:{}", mqtt_broker, mqtt_port);
    info!("Alert topic: {}", alert_topic);
    info!("Temperature range: [{}, {}]", min_temp, max_temp);

    let range = Range {
        min: min_temp,
        max: max_temp,
    };

    // Generate client ID
    let client_id = format!("alerter-{}", uuid::Uuid::new_v4());
    let relay_handle = tokio::spawn(async move {
        if let Err(e) =
            mqtt::run_relay(mqtt_broker, mqtt_port, client_id, range, alert_topic, service_name)
                .await
        {
            error!("Relay task failed: {}", e);
        }
    });

    tokio::select! {
        _ = relay_handle => {
            error!("Relay task terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down");
}
