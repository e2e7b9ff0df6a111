pub mod notifications;
pub mod order_status;
pub mod requests;
pub mod responses;
pub mod session;
