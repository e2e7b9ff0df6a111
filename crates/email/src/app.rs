use crate::{
    handler::EmailHandler,
    service::{KafkaEmailConsumer, SmtpMailer},
};
use shared::{abstract_trait::DynEmailService, config::EmailConfig, errors::ServiceError};
use std::sync::Arc;
use tracing::info;

pub struct EmailWorker {
    config: EmailConfig,
}

impl EmailWorker {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<(), ServiceError> {
        let mailer = Arc::new(SmtpMailer::new(&self.config)?) as DynEmailService;

        let handler = EmailHandler::new(mailer);

        let consumer =
            KafkaEmailConsumer::new(&self.config.kafka_broker, &self.config.topic, handler)?;

        info!("🚀 Starting email worker...");
        consumer.run().await
    }
}
