use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_page, default_page_size};
use crate::domain::order_status::{OrderStatus, PaymentMethod};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Matches order number and buyer email.
    #[serde(default)]
    pub search: String,

    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    #[validate(length(min = 5, max = 1000, message = "Shipping address is required"))]
    #[schema(example = "12 Harley Street, London W1G 9PF")]
    pub shipping_address: String,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitPaymentRequest {
    #[validate(length(min = 3, max = 255, message = "Transfer reference is required"))]
    #[schema(example = "TRX-88231-MS")]
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeclineOrderRequest {
    #[validate(length(min = 1, max = 1000, message = "A decline reason is required"))]
    #[schema(example = "Payment not received within 7 days")]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CancelOrderRequest {
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

/// Order header written by checkout.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub user_id: i32,
    pub payment_method: PaymentMethod,
    pub total: i64,
    pub shipping_address: String,
    pub notes: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// Snapshot of a cart line at purchase time.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub product_price: i64,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub subtotal: i64,
}
