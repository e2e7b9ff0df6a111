use crate::{
    abstract_trait::{
        DynCacheStore, DynCartRepository, DynEmailService, DynOrderCommandRepository,
        DynOrderQueryRepository, DynUserQueryRepository, OrderCommandServiceTrait,
    },
    config::BankConfig,
    domain::{
        notifications::Notifications,
        order_status::{OrderStatus, PaymentMethod},
        requests::{
            CancelOrderRequest, CheckoutRequest, DeclineOrderRequest, NewOrder, NewOrderItem,
            SubmitPaymentRequest,
        },
        responses::{ApiResponse, BankDetailsResponse, OrderDetailResponse, OrderResponse},
    },
    errors::ServiceError,
    model::{CartLine, Order, OrderWithBuyer},
    service::{
        email::{send_optional, send_quietly},
        homepage::HOMEPAGE_CACHE_KEY,
    },
    utils::{Method, ServiceTracer, generate_order_number},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use tracing::{error, info, warn};

pub struct OrderCommandServiceDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
    pub cart: DynCartRepository,
    pub users: DynUserQueryRepository,
    pub email: DynEmailService,
    pub notifications: Notifications,
    pub bank: BankConfig,
    /// Stock moves invalidate the cached homepage, which embeds featured stock.
    pub cache: DynCacheStore,
}

pub struct OrderCommandService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    cart: DynCartRepository,
    users: DynUserQueryRepository,
    email: DynEmailService,
    notifications: Notifications,
    bank: BankConfig,
    cache: DynCacheStore,
    tracer: ServiceTracer,
}

/// Freezes cart lines into order items and sums the total.
fn snapshot_lines(lines: Vec<CartLine>) -> Result<(Vec<NewOrderItem>, i64), ServiceError> {
    if lines.is_empty() {
        return Err(ServiceError::validation("Your cart is empty"));
    }

    let mut total: i64 = 0;
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        if !line.is_active {
            return Err(ServiceError::Conflict(format!(
                "'{}' is no longer available",
                line.name
            )));
        }
        if line.quantity > line.stock {
            return Err(ServiceError::InsufficientStock(format!(
                "Only {} of '{}' left in stock",
                line.stock, line.name
            )));
        }

        let subtotal = line.line_total();
        total = total
            .checked_add(subtotal)
            .ok_or_else(|| ServiceError::validation("Order total is too large"))?;

        items.push(NewOrderItem {
            product_id: line.product_id,
            product_name: line.name,
            product_price: line.price,
            product_image: line.image_url,
            quantity: line.quantity,
            subtotal,
        });
    }

    Ok((items, total))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, tracer: ServiceTracer) -> Self {
        let OrderCommandServiceDeps {
            query,
            command,
            cart,
            users,
            email,
            notifications,
            bank,
            cache,
        } = deps;

        Self {
            query,
            command,
            cart,
            users,
            email,
            notifications,
            bank,
            cache,
            tracer,
        }
    }

    async fn load(&self, order_id: i32) -> Result<(OrderWithBuyer, OrderStatus), ServiceError> {
        let row = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order"))?;
        let status = row.order.status.parse::<OrderStatus>()?;
        Ok((row, status))
    }

    async fn move_order(
        &self,
        order_id: i32,
        current: OrderStatus,
        next: OrderStatus,
        reason: Option<&str>,
    ) -> Result<Order, ServiceError> {
        current.transition(next)?;

        match self.command.transition(order_id, next, reason).await? {
            Some(order) => {
                if next.releases_stock() {
                    self.cache.delete(HOMEPAGE_CACHE_KEY).await;
                }
                Ok(order)
            }
            None => {
                // lost a race with another transition
                warn!("⚠️ Order {order_id} left pending before it could become {next}");
                let (_, latest) = self.load(order_id).await?;
                Err(ServiceError::InvalidTransition {
                    from: latest.to_string(),
                    to: next.to_string(),
                })
            }
        }
    }

    async fn admin_transition(
        &self,
        order_id: i32,
        next: OrderStatus,
        reason: Option<&str>,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let (row, current) = self.load(order_id).await?;
        let order = self.move_order(order_id, current, next, reason).await?;

        info!("🔄 Admin moved order {} to {next}", order.order_number);
        send_quietly(
            &self.email,
            self.notifications
                .order_status_changed(&row.buyer_email, &order, next),
        )
        .await;

        Ok(ApiResponse::success(
            format!("Order {next}"),
            OrderResponse::from(order),
        ))
    }

    fn attributes(order_id: i32) -> Vec<KeyValue> {
        vec![
            KeyValue::new("component", "order"),
            KeyValue::new("order.id", order_id.to_string()),
        ]
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn checkout(
        &self,
        user_id: i32,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        info!("💳 Checkout started by user {user_id}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "Checkout",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", user_id.to_string()),
                KeyValue::new("payment_method", req.payment_method.as_str()),
            ],
        );

        let user = match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.tracer
                    .failure(&tracing_ctx, method, "User not found")
                    .await;
                return Err(ServiceError::Unauthorized("Account no longer exists".into()));
            }
            Err(e) => {
                error!("❌ Failed to load user {user_id}: {e:?}");
                self.tracer
                    .failure(&tracing_ctx, method, "Database error")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        if !user.is_approved {
            warn!("⚠️ Checkout refused, user {user_id} is not approved");
            self.tracer
                .failure(&tracing_ctx, method, "Account not approved")
                .await;
            return Err(ServiceError::NotApproved);
        }

        let shipping_address = req.shipping_address.trim();
        if shipping_address.is_empty() {
            self.tracer
                .failure(&tracing_ctx, method, "Missing shipping address")
                .await;
            return Err(ServiceError::validation("Shipping address is required"));
        }

        let lines = match self.cart.find_lines(user_id).await {
            Ok(lines) => lines,
            Err(e) => {
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to load cart")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        let (items, total) = match snapshot_lines(lines) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("⚠️ Checkout of user {user_id} rejected: {e}");
                self.tracer
                    .failure(&tracing_ctx, method, &e.to_string())
                    .await;
                return Err(e);
            }
        };

        let order_number = match generate_order_number(Utc::now().date_naive()) {
            Ok(number) => number,
            Err(e) => {
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to generate order number")
                    .await;
                return Err(ServiceError::Internal(format!(
                    "Failed to generate order number: {e}"
                )));
            }
        };

        let new_order = NewOrder {
            order_number,
            user_id,
            payment_method: req.payment_method,
            total,
            shipping_address: shipping_address.to_string(),
            notes: non_blank(req.notes.as_deref()),
            items,
        };

        let order = match self.command.create_order(&new_order).await {
            Ok(order) => order,
            Err(e) => {
                error!("❌ Failed to place order for user {user_id}: {e:?}");
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to place order")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        self.cache.delete(HOMEPAGE_CACHE_KEY).await;

        let items = match self.query.find_items(order.order_id).await {
            Ok(items) => items,
            Err(e) => {
                self.tracer
                    .failure(&tracing_ctx, method, "Failed to load order items")
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        send_quietly(
            &self.email,
            self.notifications.order_placed(&user, &order, &self.bank),
        )
        .await;
        send_optional(&self.email, self.notifications.admin_new_order(&user, &order)).await;

        let mut detail = OrderDetailResponse::new(order, items);
        if req.payment_method == PaymentMethod::BankTransfer {
            detail.bank_details = Some(BankDetailsResponse::from(&self.bank));
        }

        self.tracer
            .success(&tracing_ctx, method, "Order placed")
            .await;

        Ok(ApiResponse::success("Order placed", detail))
    }

    async fn cancel_my_order(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("CancelMyOrder", Self::attributes(order_id));

        let result = async {
            let (row, current) = self.load(order_id).await?;
            if row.order.user_id != user_id {
                return Err(ServiceError::not_found("Order"));
            }

            let order = self
                .move_order(order_id, current, OrderStatus::Cancelled, None)
                .await?;

            info!("🚫 User {user_id} cancelled order {}", order.order_number);
            Ok(ApiResponse::success(
                "Order cancelled",
                OrderResponse::from(order),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Patch, result, "Order cancelled")
            .await
    }

    async fn approve_order(&self, order_id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("ApproveOrder", Self::attributes(order_id));

        let result = self
            .admin_transition(order_id, OrderStatus::Approved, None)
            .await;

        self.tracer
            .record(&tracing_ctx, Method::Patch, result, "Order approved")
            .await
    }

    async fn decline_order(
        &self,
        order_id: i32,
        req: &DeclineOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("DeclineOrder", Self::attributes(order_id));

        let result = match non_blank(Some(&req.reason)) {
            Some(reason) => {
                self.admin_transition(order_id, OrderStatus::Declined, Some(&reason))
                    .await
            }
            None => Err(ServiceError::validation(
                "A reason is required to decline an order",
            )),
        };

        self.tracer
            .record(&tracing_ctx, Method::Patch, result, "Order declined")
            .await
    }

    async fn cancel_order(
        &self,
        order_id: i32,
        req: &CancelOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("CancelOrder", Self::attributes(order_id));

        let reason = non_blank(req.reason.as_deref());
        let result = self
            .admin_transition(order_id, OrderStatus::Cancelled, reason.as_deref())
            .await;

        self.tracer
            .record(&tracing_ctx, Method::Patch, result, "Order cancelled")
            .await
    }

    fn bank_details(&self) -> ApiResponse<BankDetailsResponse> {
        ApiResponse::success(
            "Bank details retrieved",
            BankDetailsResponse::from(&self.bank),
        )
    }

    async fn submit_payment(
        &self,
        user_id: i32,
        order_id: i32,
        req: &SubmitPaymentRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start("SubmitPayment", Self::attributes(order_id));

        let result = async {
            let reference = non_blank(Some(&req.reference))
                .ok_or_else(|| ServiceError::validation("Transfer reference is required"))?;

            let (row, current) = self.load(order_id).await?;
            if row.order.user_id != user_id {
                return Err(ServiceError::not_found("Order"));
            }
            if row.order.payment_method != PaymentMethod::BankTransfer.as_str() {
                return Err(ServiceError::Conflict(
                    "Only bank transfer orders take a payment reference".into(),
                ));
            }
            if current != OrderStatus::Pending {
                return Err(ServiceError::Conflict(format!(
                    "Payment cannot be submitted for a {current} order"
                )));
            }

            let order = self
                .command
                .submit_payment(order_id, user_id, &reference)
                .await?
                .ok_or_else(|| {
                    ServiceError::Conflict("Order is no longer awaiting payment".into())
                })?;

            info!("💰 Payment reference recorded for order {}", order.order_number);
            send_optional(&self.email, self.notifications.payment_submitted(&order)).await;

            Ok(ApiResponse::success(
                "Payment submitted",
                OrderResponse::from(order),
            ))
        }
        .await;

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Payment submitted")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: i64, quantity: i32, stock: i32, is_active: bool) -> CartLine {
        CartLine {
            cart_item_id: 1,
            product_id: 7,
            quantity,
            name: name.into(),
            slug: name.to_lowercase(),
            price,
            stock,
            image_url: None,
            is_active,
        }
    }

    #[test]
    fn snapshot_sums_line_totals() {
        let (items, total) = snapshot_lines(vec![
            line("Gloves", 1_250, 2, 10, true),
            line("Masks", 399, 3, 3, true),
        ])
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].subtotal, 2_500);
        assert_eq!(total, 2_500 + 1_197);
    }

    #[test]
    fn empty_cart_cannot_be_checked_out() {
        assert!(matches!(
            snapshot_lines(Vec::new()),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn overbooked_and_inactive_lines_are_rejected() {
        assert!(matches!(
            snapshot_lines(vec![line("Gloves", 100, 5, 4, true)]),
            Err(ServiceError::InsufficientStock(_))
        ));
        assert!(matches!(
            snapshot_lines(vec![line("Gloves", 100, 1, 4, false)]),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn blank_reasons_are_dropped() {
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some(" late ")), Some("late".to_string()));
    }
}
