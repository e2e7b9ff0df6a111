use shared::{
    abstract_trait::{DynEmailService, EmailRequest},
    errors::ServiceError,
};
use tracing::{error, info};

pub struct EmailHandler {
    mailer: DynEmailService,
}

impl EmailHandler {
    pub fn new(mailer: DynEmailService) -> Self {
        Self { mailer }
    }

    pub async fn handle_payload(&self, payload: &[u8]) -> Result<(), ServiceError> {
        let request: EmailRequest = serde_json::from_slice(payload).map_err(|e| {
            error!(
                "❌ Failed to decode email request: {e}, payload: {}",
                String::from_utf8_lossy(payload)
            );
            ServiceError::Custom(format!("Invalid JSON payload: {e}"))
        })?;

        info!("📨 Delivering '{}' to {}", request.subject, request.to);

        self.mailer.send(&request).await
    }
}
