mod kafka;
mod smtp;

pub use self::kafka::KafkaEmailConsumer;
pub use self::smtp::SmtpMailer;
