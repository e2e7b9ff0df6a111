use crate::{
    domain::{
        requests::{AddToCartRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{CartItem, CartLine},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;
pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    async fn find_lines(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError>;
    async fn find_item(
        &self,
        user_id: i32,
        cart_item_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;
    async fn find_by_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;
    /// Inserts the line or adds `quantity` to the existing one.
    async fn upsert_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError>;
    async fn update_quantity(
        &self,
        user_id: i32,
        cart_item_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;
    async fn remove_item(&self, user_id: i32, cart_item_id: i32) -> Result<bool, RepositoryError>;
    async fn clear(&self, user_id: i32) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(&self, user_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add_item(
        &self,
        user_id: i32,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn update_item(
        &self,
        user_id: i32,
        cart_item_id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove_item(
        &self,
        user_id: i32,
        cart_item_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn clear(&self, user_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError>;
}
