use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::BankConfig;
use crate::model::{Order, OrderItem, OrderWithBuyer};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub order_number: String,
    pub user_id: i32,
    pub status: String,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub payment_submitted_at: Option<String>,
    pub total: i64,
    pub shipping_address: String,
    pub notes: Option<String>,
    pub decline_reason: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            order_number: value.order_number,
            user_id: value.user_id,
            status: value.status,
            payment_method: value.payment_method,
            payment_reference: value.payment_reference,
            payment_submitted_at: value.payment_submitted_at.map(|dt| dt.to_string()),
            total: value.total,
            shipping_address: value.shipping_address,
            notes: value.notes,
            decline_reason: value.decline_reason,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: Option<i32>,
    pub product_name: String,
    pub product_price: i64,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub subtotal: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            id: value.order_item_id,
            product_id: value.product_id,
            product_name: value.product_name,
            product_price: value.product_price,
            product_image: value.product_image,
            quantity: value.quantity,
            subtotal: value.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct BuyerResponse {
    pub user_id: i32,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct BankDetailsResponse {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub iban: Option<String>,
    pub swift: Option<String>,
    pub instructions: String,
}

impl From<&BankConfig> for BankDetailsResponse {
    fn from(value: &BankConfig) -> Self {
        BankDetailsResponse {
            bank_name: value.bank_name.clone(),
            account_name: value.account_name.clone(),
            account_number: value.account_number.clone(),
            iban: value.iban.clone(),
            swift: value.swift.clone(),
            instructions: value.instructions.clone(),
        }
    }
}

/// Order header, its frozen lines and, for admins, the buyer.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderDetailResponse {
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<BuyerResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetailsResponse>,
}

impl OrderDetailResponse {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            order: OrderResponse::from(order),
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            buyer: None,
            bank_details: None,
        }
    }

    pub fn with_buyer(row: OrderWithBuyer, items: Vec<OrderItem>) -> Self {
        let buyer = BuyerResponse {
            user_id: row.order.user_id,
            email: row.buyer_email,
            name: row.buyer_name,
        };
        let mut detail = Self::new(row.order, items);
        detail.buyer = Some(buyer);
        detail
    }
}
