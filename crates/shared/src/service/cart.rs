use crate::{
    abstract_trait::{CartServiceTrait, DynCartRepository, DynProductQueryRepository},
    domain::{
        requests::{AddToCartRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::ServiceError,
    model::Product,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct CartService {
    cart: DynCartRepository,
    products: DynProductQueryRepository,
    tracer: ServiceTracer,
}

impl CartService {
    pub async fn new(
        cart: DynCartRepository,
        products: DynProductQueryRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        Self {
            cart,
            products,
            tracer: ServiceTracer::new("cart_service", registry).await,
        }
    }

    async fn load(&self, user_id: i32, message: &str) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let lines = self.cart.find_lines(user_id).await?;
        Ok(ApiResponse::success(message, CartResponse::from(lines)))
    }

    async fn purchasable(&self, product_id: i32) -> Result<Product, ServiceError> {
        match self.products.find_by_id(product_id).await? {
            Some(product) if product.is_active => Ok(product),
            _ => Err(ServiceError::not_found("Product")),
        }
    }

    fn ensure_stock(product: &Product, quantity: i32) -> Result<(), ServiceError> {
        if quantity > product.stock {
            warn!(
                "⚠️ Requested {quantity} of product {} but only {} in stock",
                product.product_id, product.stock
            );
            return Err(ServiceError::InsufficientStock(format!(
                "Only {} of '{}' left in stock",
                product.stock, product.name
            )));
        }
        Ok(())
    }

    fn attributes(user_id: i32) -> Vec<KeyValue> {
        vec![
            KeyValue::new("component", "cart"),
            KeyValue::new("user.id", user_id.to_string()),
        ]
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(&self, user_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("GetCart", Self::attributes(user_id));

        let result = self.load(user_id, "Cart retrieved").await;

        self.tracer
            .record(&tracing_ctx, Method::Get, result, "Cart retrieved")
            .await
    }

    async fn add_item(
        &self,
        user_id: i32,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!(
            "🛒 User {user_id} adds {} x product {}",
            req.quantity, req.product_id
        );

        let tracing_ctx = self.tracer.start("AddCartItem", Self::attributes(user_id));

        let result = async {
            let product = self.purchasable(req.product_id).await?;

            let already = self
                .cart
                .find_by_product(user_id, req.product_id)
                .await?
                .map(|item| item.quantity)
                .unwrap_or(0);
            Self::ensure_stock(&product, already + req.quantity)?;

            self.cart
                .upsert_item(user_id, req.product_id, req.quantity)
                .await?;

            self.load(user_id, "Item added to cart").await
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Item added to cart")
            .await
    }

    async fn update_item(
        &self,
        user_id: i32,
        cart_item_id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("UpdateCartItem", Self::attributes(user_id));

        let result = async {
            let item = self
                .cart
                .find_item(user_id, cart_item_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Cart item"))?;

            let product = self.purchasable(item.product_id).await?;
            Self::ensure_stock(&product, req.quantity)?;

            self.cart
                .update_quantity(user_id, cart_item_id, req.quantity)
                .await?
                .ok_or_else(|| ServiceError::not_found("Cart item"))?;

            self.load(user_id, "Cart updated").await
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Put, result, "Cart updated")
            .await
    }

    async fn remove_item(
        &self,
        user_id: i32,
        cart_item_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let tracing_ctx = self
            .tracer
            .start("RemoveCartItem", Self::attributes(user_id));

        let result = async {
            if !self.cart.remove_item(user_id, cart_item_id).await? {
                return Err(ServiceError::not_found("Cart item"));
            }
            self.load(user_id, "Item removed from cart").await
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, "Item removed from cart")
            .await
    }

    async fn clear(&self, user_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("ClearCart", Self::attributes(user_id));

        let result = async {
            let removed = self.cart.clear(user_id).await?;
            info!("🧹 Cleared {removed} item(s) from cart of user {user_id}");
            self.load(user_id, "Cart cleared").await
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Delete, result, "Cart cleared")
            .await
    }
}
