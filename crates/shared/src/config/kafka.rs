use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::time::Duration;
use tracing::{debug, info};

use crate::abstract_trait::KafkaTrait;
use crate::errors::ServiceError;

const QUEUE_TIMEOUT: Duration = Duration::from_secs(5);

/// Producer side of the email queue.
pub struct Kafka {
    producer: FutureProducer,
}

impl Kafka {
    pub fn new(brokers: &str) -> Result<Self, ServiceError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "6000")
            .set("acks", "all")
            .set("allow.auto.create.topics", "true")
            .create()?;

        info!("📡 Kafka producer ready on {brokers}");

        Ok(Self { producer })
    }
}

#[async_trait]
impl KafkaTrait for Kafka {
    /// Resolves once the broker acknowledges the record.
    async fn publish(&self, topic: &str, key: &str, value: &[u8]) -> Result<(), ServiceError> {
        let record = FutureRecord::to(topic).key(key).payload(value);

        self.producer
            .send(record, QUEUE_TIMEOUT)
            .await
            .map_err(|(err, _message)| ServiceError::from(err))?;

        debug!(topic, key, "Record delivered");
        Ok(())
    }
}
