use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub cart_item_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A cart row joined with the product it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartLine {
    pub cart_item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity as i64
    }
}
