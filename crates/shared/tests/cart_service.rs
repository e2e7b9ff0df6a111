mod common;

use common::{CartStore, ProductStore, product, registry};
use shared::{
    abstract_trait::CartServiceTrait,
    domain::requests::{AddToCartRequest, UpdateCartItemRequest},
    errors::ServiceError,
    service::CartService,
};
use std::sync::Arc;

const BUYER: i32 = 1;

async fn cart_with(products: Vec<shared::model::Product>) -> (Arc<CartStore>, CartService) {
    let products = Arc::new(ProductStore::with(products));
    let cart = Arc::new(CartStore::new(products.clone()));
    let service = CartService::new(cart.clone(), products, registry()).await;
    (cart, service)
}

fn add(product_id: i32, quantity: i32) -> AddToCartRequest {
    AddToCartRequest {
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn adding_the_same_product_merges_into_one_line() {
    let (store, cart) = cart_with(vec![product(10, "Nitrile Gloves", 1_250, 50)]).await;

    cart.add_item(BUYER, &add(10, 2)).await.unwrap();
    let response = cart.add_item(BUYER, &add(10, 3)).await.unwrap();

    assert_eq!(response.data.items.len(), 1);
    assert_eq!(response.data.items[0].quantity, 5);
    assert_eq!(response.data.subtotal, 6_250);
    assert_eq!(response.data.item_count, 5);
    assert_eq!(store.quantities(BUYER), vec![(10, 5)]);
}

#[tokio::test]
async fn cart_quantity_never_exceeds_stock() {
    let (store, cart) = cart_with(vec![product(10, "Suture Kit", 4_000, 4)]).await;

    cart.add_item(BUYER, &add(10, 3)).await.unwrap();
    let err = cart.add_item(BUYER, &add(10, 2)).await.unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientStock(_)));
    assert_eq!(store.quantities(BUYER), vec![(10, 3)]);

    let line_id = store.items.lock().unwrap()[0].cart_item_id;
    let err = cart
        .update_item(BUYER, line_id, &UpdateCartItemRequest { quantity: 5 })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientStock(_)));

    let response = cart
        .update_item(BUYER, line_id, &UpdateCartItemRequest { quantity: 4 })
        .await
        .unwrap();
    assert_eq!(response.data.items[0].quantity, 4);
}

#[tokio::test]
async fn inactive_and_unknown_products_cannot_be_added() {
    let mut hidden = product(11, "Discontinued Mask", 300, 100);
    hidden.is_active = false;
    let (store, cart) = cart_with(vec![hidden]).await;

    assert!(matches!(
        cart.add_item(BUYER, &add(11, 1)).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        cart.add_item(BUYER, &add(99, 1)).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(store.quantities(BUYER).is_empty());
}

#[tokio::test]
async fn lines_of_another_doctor_are_invisible() {
    let (store, cart) = cart_with(vec![product(10, "Scalpel", 900, 20)]).await;

    cart.add_item(2, &add(10, 1)).await.unwrap();
    let foreign_line = store.items.lock().unwrap()[0].cart_item_id;

    assert!(matches!(
        cart.update_item(BUYER, foreign_line, &UpdateCartItemRequest { quantity: 2 })
            .await
            .unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        cart.remove_item(BUYER, foreign_line).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert_eq!(store.quantities(2), vec![(10, 1)]);
}

#[tokio::test]
async fn clearing_empties_only_the_callers_cart() {
    let (store, cart) = cart_with(vec![
        product(10, "Scalpel", 900, 20),
        product(12, "Gauze", 150, 200),
    ])
    .await;

    cart.add_item(BUYER, &add(10, 1)).await.unwrap();
    cart.add_item(BUYER, &add(12, 10)).await.unwrap();
    cart.add_item(2, &add(12, 1)).await.unwrap();

    let response = cart.clear(BUYER).await.unwrap();

    assert!(response.data.items.is_empty());
    assert_eq!(response.data.subtotal, 0);
    assert_eq!(store.quantities(2), vec![(12, 1)]);
}
