use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub order_number: String,
    pub user_id: i32,
    pub status: String,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub payment_submitted_at: Option<NaiveDateTime>,
    pub total: i64,
    pub shipping_address: String,
    pub notes: Option<String>,
    pub decline_reason: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Line captured at checkout; name, price and image are frozen copies.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub product_name: String,
    pub product_price: i64,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub subtotal: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderWithBuyer {
    #[sqlx(flatten)]
    pub order: Order,
    pub buyer_email: String,
    pub buyer_name: String,
}
