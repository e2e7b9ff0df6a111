mod common;

use common::{
    CarouselStore, FeaturedStore, ProductStore, RecordingCache, TaxonomyStore, product, registry,
    slide, taxonomy_row,
};
use shared::{
    abstract_trait::HomepageServiceTrait,
    domain::requests::{CarouselPosition, CreateFeaturedRequest},
    errors::{RepositoryError, ServiceError},
    service::{HOMEPAGE_CACHE_KEY, HomepageService, HomepageServiceDeps},
};
use std::sync::Arc;

struct Storefront {
    products: Arc<ProductStore>,
    carousel: Arc<CarouselStore>,
    cache: Arc<RecordingCache>,
    service: HomepageService,
}

async fn storefront() -> Storefront {
    let products = Arc::new(ProductStore::with(vec![
        product(10, "Nitrile Gloves", 1_250, 10),
        product(11, "Surgical Masks", 399, 5),
    ]));
    let carousel = Arc::new(CarouselStore::with(vec![
        slide(1, "Spring restock", 0),
        slide(2, "New diagnostic brands", 1),
    ]));
    let cache = Arc::new(RecordingCache::default());

    let service = HomepageService::new(HomepageServiceDeps {
        carousel: carousel.clone(),
        featured: Arc::new(FeaturedStore::new(products.clone())),
        categories: Arc::new(TaxonomyStore::with(vec![taxonomy_row(1, "Diagnostics")])),
        brands: Arc::new(TaxonomyStore::with(vec![taxonomy_row(1, "Littmann")])),
        cache: cache.clone(),
        registry: registry(),
    })
    .await;

    Storefront {
        products,
        carousel,
        cache,
        service,
    }
}

fn position(id: i32, display_order: i32) -> CarouselPosition {
    CarouselPosition { id, display_order }
}

#[tokio::test]
async fn homepage_is_built_once_then_served_from_cache() {
    let shop = storefront().await;

    let first = shop.service.homepage().await.unwrap().data;
    assert_eq!(first.carousel.len(), 2);
    assert_eq!(first.categories[0].name, "Diagnostics");
    assert_eq!(first.brands[0].slug, "littmann");
    assert_eq!(shop.carousel.reads(), 1);
    assert!(
        shop.cache
            .values
            .lock()
            .unwrap()
            .contains_key(HOMEPAGE_CACHE_KEY)
    );

    shop.carousel
        .items
        .lock()
        .unwrap()
        .push(slide(3, "Free shipping week", 2));

    let cached = shop.service.homepage().await.unwrap().data;
    assert_eq!(cached.carousel.len(), 2);
    assert_eq!(shop.carousel.reads(), 1);

    shop.service.invalidate().await;

    let rebuilt = shop.service.homepage().await.unwrap().data;
    assert_eq!(rebuilt.carousel.len(), 3);
    assert_eq!(shop.carousel.reads(), 2);
}

#[tokio::test]
async fn reorder_with_an_unknown_slide_changes_nothing() {
    let shop = storefront().await;

    let err = shop
        .service
        .reorder_carousel(&[position(2, 0), position(99, 1)])
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));
    assert_eq!(shop.carousel.orders(), vec![(1, 0), (2, 1)]);
    assert!(shop.cache.deleted.lock().unwrap().is_empty());

    assert!(matches!(
        shop.service.reorder_carousel(&[]).await.unwrap_err(),
        ServiceError::Validation(_)
    ));
}

#[tokio::test]
async fn reorder_returns_slides_in_their_new_order() {
    let shop = storefront().await;

    let reordered = shop
        .service
        .reorder_carousel(&[position(1, 1), position(2, 0)])
        .await
        .unwrap()
        .data;

    let ids: Vec<i32> = reordered.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(
        shop.cache.deleted.lock().unwrap().clone(),
        vec![HOMEPAGE_CACHE_KEY.to_string()]
    );
}

#[tokio::test]
async fn a_product_is_featured_at_most_once() {
    let shop = storefront().await;
    let gloves = CreateFeaturedRequest {
        product_id: 10,
        display_order: 0,
    };

    let featured = shop.service.add_featured(&gloves).await.unwrap().data;
    assert_eq!(featured.product.id, 10);
    assert!(featured.is_active);

    let err = shop.service.add_featured(&gloves).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(shop.cache.deleted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn inactive_products_drop_off_the_featured_row() {
    let shop = storefront().await;
    for product_id in [10, 11] {
        shop.service
            .add_featured(&CreateFeaturedRequest {
                product_id,
                display_order: product_id,
            })
            .await
            .unwrap();
    }

    shop.products
        .products
        .lock()
        .unwrap()
        .iter_mut()
        .filter(|p| p.product_id == 11)
        .for_each(|p| p.is_active = false);

    let page = shop.service.homepage().await.unwrap().data;
    let ids: Vec<i32> = page.featured.iter().map(|f| f.product.id).collect();
    assert_eq!(ids, vec![10]);

    let all = shop.service.list_featured(false).await.unwrap().data;
    assert_eq!(all.len(), 2);
}
