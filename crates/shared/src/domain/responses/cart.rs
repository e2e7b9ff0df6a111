use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::CartLine;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartLineResponse {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub price: i64,
    pub quantity: i32,
    pub stock: i32,
    pub available: bool,
    pub line_total: i64,
}

impl From<CartLine> for CartLineResponse {
    fn from(value: CartLine) -> Self {
        let line_total = value.line_total();
        let available = value.is_active && value.stock >= value.quantity;

        CartLineResponse {
            id: value.cart_item_id,
            product_id: value.product_id,
            name: value.name,
            slug: value.slug,
            image_url: value.image_url,
            price: value.price,
            quantity: value.quantity,
            stock: value.stock,
            available,
            line_total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub subtotal: i64,
    pub item_count: i64,
}

impl From<Vec<CartLine>> for CartResponse {
    fn from(lines: Vec<CartLine>) -> Self {
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        let item_count = lines.iter().map(|l| l.quantity as i64).sum();

        CartResponse {
            items: lines.into_iter().map(CartLineResponse::from).collect(),
            subtotal,
            item_count,
        }
    }
}
