mod common;

use common::{
    ADMIN_EMAIL, CartStore, OrderStore, ProductStore, RecordingCache, RecordingEmail, UserStore,
    bank, doctor, notifications, product, registry,
};
use shared::{
    abstract_trait::{CartRepositoryTrait, OrderCommandServiceTrait, OrderQueryServiceTrait},
    domain::{
        order_status::PaymentMethod,
        requests::{
            CancelOrderRequest, CheckoutRequest, DeclineOrderRequest, SubmitPaymentRequest,
        },
    },
    errors::ServiceError,
    service::{HOMEPAGE_CACHE_KEY, OrderCommandServiceDeps, OrderService},
};
use std::sync::Arc;

const BUYER: i32 = 1;
const OTHER: i32 = 2;

struct Shop {
    products: Arc<ProductStore>,
    cart: Arc<CartStore>,
    orders: Arc<OrderStore>,
    email: Arc<RecordingEmail>,
    cache: Arc<RecordingCache>,
    service: OrderService,
}

async fn shop(buyer_approved: bool) -> Shop {
    let users = Arc::new(UserStore::with(vec![
        doctor(BUYER, "foreman@ppth.example", buyer_approved),
        doctor(OTHER, "cameron@ppth.example", true),
    ]));
    let products = Arc::new(ProductStore::with(vec![
        product(10, "Nitrile Gloves", 1_250, 10),
        product(11, "Surgical Masks", 399, 5),
    ]));
    let cart = Arc::new(CartStore::new(products.clone()));
    let orders = Arc::new(OrderStore::new(users.clone(), products.clone(), cart.clone()));
    let email = Arc::new(RecordingEmail::default());
    let cache = Arc::new(RecordingCache::default());

    let service = OrderService::new(
        orders.clone(),
        bank(),
        OrderCommandServiceDeps {
            query: orders.clone(),
            command: orders.clone(),
            cart: cart.clone(),
            users,
            email: email.clone(),
            notifications: notifications(),
            bank: bank(),
            cache: cache.clone(),
        },
        registry(),
    )
    .await;

    Shop {
        products,
        cart,
        orders,
        email,
        cache,
        service,
    }
}

fn checkout(payment_method: PaymentMethod) -> CheckoutRequest {
    CheckoutRequest {
        shipping_address: "221B Baker Street, London".into(),
        notes: Some("   ".into()),
        payment_method,
    }
}

async fn place_order(shop: &Shop, user_id: i32, payment_method: PaymentMethod) -> i32 {
    shop.cart.upsert_item(user_id, 10, 2).await.unwrap();
    shop.cart.upsert_item(user_id, 11, 1).await.unwrap();
    shop.service
        .command
        .checkout(user_id, &checkout(payment_method))
        .await
        .unwrap()
        .data
        .order
        .id
}

#[tokio::test]
async fn unapproved_doctor_cannot_check_out() {
    let shop = shop(false).await;
    shop.cart.upsert_item(BUYER, 10, 1).await.unwrap();

    let err = shop
        .service
        .command
        .checkout(BUYER, &checkout(PaymentMethod::BankTransfer))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotApproved));
    assert_eq!(shop.cart.quantities(BUYER), vec![(10, 1)]);
}

#[tokio::test]
async fn empty_cart_cannot_be_checked_out() {
    let shop = shop(true).await;

    let err = shop
        .service
        .command
        .checkout(BUYER, &checkout(PaymentMethod::CashOnDelivery))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(shop.orders.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn checkout_freezes_the_cart_into_a_pending_order() {
    let shop = shop(true).await;
    shop.cart.upsert_item(BUYER, 10, 2).await.unwrap();
    shop.cart.upsert_item(BUYER, 11, 3).await.unwrap();

    let detail = shop
        .service
        .command
        .checkout(BUYER, &checkout(PaymentMethod::BankTransfer))
        .await
        .unwrap()
        .data;

    assert_eq!(detail.order.status, "pending");
    assert_eq!(detail.order.total, 2 * 1_250 + 3 * 399);
    assert_eq!(detail.order.notes, None);
    assert!(detail.order.order_number.starts_with("MS-"));
    assert_eq!(detail.items.len(), 2);
    assert_eq!(
        detail.bank_details.as_ref().map(|b| b.account_number.as_str()),
        Some("00112233")
    );

    assert!(shop.cart.quantities(BUYER).is_empty());
    assert_eq!(shop.products.get(10).unwrap().stock, 8);
    assert_eq!(shop.products.get(11).unwrap().stock, 2);

    assert_eq!(
        shop.email.recipients(),
        vec!["foreman@ppth.example".to_string(), ADMIN_EMAIL.to_string()]
    );
}

#[tokio::test]
async fn cash_on_delivery_orders_carry_no_bank_details() {
    let shop = shop(true).await;
    shop.cart.upsert_item(BUYER, 10, 1).await.unwrap();

    let detail = shop
        .service
        .command
        .checkout(BUYER, &checkout(PaymentMethod::CashOnDelivery))
        .await
        .unwrap()
        .data;

    assert!(detail.bank_details.is_none());
    assert_eq!(detail.order.payment_method, "cash_on_delivery");
}

#[tokio::test]
async fn overbooked_cart_is_rejected_without_touching_stock() {
    let shop = shop(true).await;
    shop.cart.upsert_item(BUYER, 11, 6).await.unwrap();

    let err = shop
        .service
        .command
        .checkout(BUYER, &checkout(PaymentMethod::BankTransfer))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientStock(_)));
    assert_eq!(shop.products.get(11).unwrap().stock, 5);
    assert_eq!(shop.cart.quantities(BUYER), vec![(11, 6)]);
}

#[tokio::test]
async fn decline_requires_a_reason_and_restocks() {
    let shop = shop(true).await;
    let order_id = place_order(&shop, BUYER, PaymentMethod::BankTransfer).await;
    assert_eq!(shop.products.get(10).unwrap().stock, 8);

    let err = shop
        .service
        .command
        .decline_order(order_id, &DeclineOrderRequest { reason: "  ".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(shop.orders.status_of(order_id).as_deref(), Some("pending"));

    let declined = shop
        .service
        .command
        .decline_order(
            order_id,
            &DeclineOrderRequest {
                reason: "License could not be verified".into(),
            },
        )
        .await
        .unwrap()
        .data;

    assert_eq!(declined.status, "declined");
    assert_eq!(
        declined.decline_reason.as_deref(),
        Some("License could not be verified")
    );
    assert_eq!(shop.products.get(10).unwrap().stock, 10);
    assert_eq!(shop.products.get(11).unwrap().stock, 5);
}

#[tokio::test]
async fn only_pending_orders_change_status() {
    let shop = shop(true).await;
    let order_id = place_order(&shop, BUYER, PaymentMethod::CashOnDelivery).await;

    shop.service.command.approve_order(order_id).await.unwrap();

    let err = shop
        .service
        .command
        .cancel_order(order_id, &CancelOrderRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidTransition { ref from, ref to }
            if from == "approved" && to == "cancelled"
    ));

    let err = shop
        .service
        .command
        .cancel_my_order(BUYER, order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));

    assert_eq!(shop.orders.status_of(order_id).as_deref(), Some("approved"));
    assert_eq!(shop.products.get(10).unwrap().stock, 8);
}

#[tokio::test]
async fn buyers_only_see_and_cancel_their_own_orders() {
    let shop = shop(true).await;
    let order_id = place_order(&shop, BUYER, PaymentMethod::BankTransfer).await;

    assert!(matches!(
        shop.service
            .query
            .find_my_order(OTHER, order_id)
            .await
            .unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        shop.service
            .command
            .cancel_my_order(OTHER, order_id)
            .await
            .unwrap_err(),
        ServiceError::NotFound(_)
    ));

    let cancelled = shop
        .service
        .command
        .cancel_my_order(BUYER, order_id)
        .await
        .unwrap()
        .data;
    assert_eq!(cancelled.status, "cancelled");
    assert_eq!(shop.products.get(11).unwrap().stock, 5);
}

#[tokio::test]
async fn payment_reference_is_only_taken_for_pending_bank_transfers() {
    let shop = shop(true).await;
    let transfer = place_order(&shop, BUYER, PaymentMethod::BankTransfer).await;
    let cash = place_order(&shop, BUYER, PaymentMethod::CashOnDelivery).await;

    let reference = SubmitPaymentRequest {
        reference: "TRX-88231".into(),
    };

    assert!(matches!(
        shop.service
            .command
            .submit_payment(BUYER, cash, &reference)
            .await
            .unwrap_err(),
        ServiceError::Conflict(_)
    ));

    let paid = shop
        .service
        .command
        .submit_payment(BUYER, transfer, &reference)
        .await
        .unwrap()
        .data;
    assert_eq!(paid.payment_reference.as_deref(), Some("TRX-88231"));
    assert!(paid.payment_submitted_at.is_some());

    shop.service.command.approve_order(transfer).await.unwrap();
    assert!(matches!(
        shop.service
            .command
            .submit_payment(BUYER, transfer, &reference)
            .await
            .unwrap_err(),
        ServiceError::Conflict(_)
    ));
}

#[tokio::test]
async fn stock_moves_drop_the_cached_homepage() {
    let shop = shop(true).await;
    let homepage_drops = |shop: &Shop| {
        shop.cache
            .deleted
            .lock()
            .unwrap()
            .iter()
            .filter(|key| key.as_str() == HOMEPAGE_CACHE_KEY)
            .count()
    };

    let declined = place_order(&shop, BUYER, PaymentMethod::BankTransfer).await;
    assert_eq!(homepage_drops(&shop), 1);

    shop.service
        .command
        .decline_order(
            declined,
            &DeclineOrderRequest {
                reason: "License could not be verified".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(homepage_drops(&shop), 2);

    let approved = place_order(&shop, BUYER, PaymentMethod::BankTransfer).await;
    shop.service.command.approve_order(approved).await.unwrap();
    assert_eq!(homepage_drops(&shop), 3);

    let cancelled = place_order(&shop, BUYER, PaymentMethod::CashOnDelivery).await;
    shop.service
        .command
        .cancel_my_order(BUYER, cancelled)
        .await
        .unwrap();
    assert_eq!(homepage_drops(&shop), 5);
}
