use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, MultiPart},
    transport::smtp::authentication::Credentials,
};
use shared::{
    abstract_trait::{EmailRequest, EmailServiceTrait},
    config::EmailConfig,
    errors::ServiceError,
    utils::render_email,
};
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Renders queued notifications and relays them over SMTP with STARTTLS.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, ServiceError> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = SmtpTransport::starttls_relay(&config.smtp_server)
            .map_err(|e| {
                error!("❌ Failed to create SMTP relay: {e}");
                ServiceError::Internal(format!("Failed to create SMTP relay: {e}"))
            })?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = config.from.parse().map_err(|e| {
            error!("❌ Invalid sender email '{}': {e}", config.from);
            ServiceError::Internal(format!("Invalid sender email: {e}"))
        })?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl EmailServiceTrait for SmtpMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        let rendered = render_email(&req.data).map_err(|e| {
            ServiceError::Internal(format!("Failed to render email template: {e}"))
        })?;

        let to: Mailbox = req.to.parse().map_err(|e| {
            error!("❌ Invalid recipient email '{}': {e}", req.to);
            ServiceError::Custom(format!("Invalid recipient email: {e}"))
        })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&req.subject)
            .multipart(MultiPart::alternative_plain_html(
                rendered.text,
                rendered.html,
            ))
            .map_err(|e| ServiceError::Custom(format!("Failed to build email: {e}")))?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!("✅ Email sent to {}", req.to);
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to send email to {}: {e}", req.to);
                Err(ServiceError::Custom(format!("Failed to send email: {e}")))
            }
        }
    }
}
