use crate::{
    abstract_trait::{DynEmailService, DynKafka, EmailRequest, EmailServiceTrait},
    errors::ServiceError,
};
use async_trait::async_trait;
use tracing::{error, info};

/// Hands emails to the worker through Kafka.
pub struct EmailDispatcher {
    kafka: DynKafka,
    topic: String,
}

impl EmailDispatcher {
    pub fn new(kafka: DynKafka, topic: impl Into<String>) -> Self {
        Self {
            kafka,
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl EmailServiceTrait for EmailDispatcher {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        let payload = serde_json::to_vec(req)
            .map_err(|e| ServiceError::Internal(format!("Failed to serialize email: {e}")))?;

        self.kafka.publish(&self.topic, &req.to, &payload).await?;

        info!("📨 Queued email '{}' for {}", req.subject, req.to);
        Ok(())
    }
}

/// Sends without failing the caller; delivery problems are only logged.
pub async fn send_quietly(email: &DynEmailService, req: EmailRequest) {
    if let Err(e) = email.send(&req).await {
        error!("❌ Failed to queue email '{}' for {}: {e}", req.subject, req.to);
    }
}

pub async fn send_optional(email: &DynEmailService, req: Option<EmailRequest>) {
    if let Some(req) = req {
        send_quietly(email, req).await;
    }
}
