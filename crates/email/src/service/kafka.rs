use crate::handler::EmailHandler;
use rdkafka::{
    Message,
    config::ClientConfig,
    consumer::{CommitMode, Consumer, StreamConsumer},
};
use shared::{errors::ServiceError, utils::shutdown_signal};
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

pub const CONSUMER_GROUP: &str = "medsupply-email-worker";

pub struct KafkaEmailConsumer {
    consumer: StreamConsumer,
    handler: EmailHandler,
}

impl KafkaEmailConsumer {
    pub fn new(brokers: &str, topic: &str, handler: EmailHandler) -> Result<Self, ServiceError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", CONSUMER_GROUP)
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "6000")
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .create()?;

        consumer.subscribe(&[topic])?;

        info!("📬 Subscribed to topic '{topic}' as group '{CONSUMER_GROUP}'");

        Ok(Self { consumer, handler })
    }

    /// Consumes until Ctrl+C or SIGTERM. Offsets are committed after each
    /// message, delivered or not, so a poison message is never replayed.
    pub async fn run(&self) -> Result<(), ServiceError> {
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("🛑 Email worker stopping");
                    return Ok(());
                }
                received = self.consumer.recv() => match received {
                    Err(e) => {
                        error!("⚠️ Kafka receive failed: {e:?}");
                        sleep(Duration::from_secs(5)).await;
                    }
                    Ok(message) => {
                        match message.payload() {
                            Some(payload) => {
                                if let Err(e) = self.handler.handle_payload(payload).await {
                                    error!("❌ Failed to deliver email: {e}");
                                }
                            }
                            None => warn!("⚠️ Skipping message without payload"),
                        }

                        if let Err(e) = self.consumer.commit_message(&message, CommitMode::Async) {
                            error!("❌ Failed to commit offset: {e:?}");
                        }
                    }
                },
            }
        }
    }
}
