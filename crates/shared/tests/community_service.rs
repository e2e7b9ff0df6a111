mod common;

use common::{
    NewsletterStore, RecordingCache, RecordingEmail, ReferralStore, TaxonomyStore, UserStore,
    doctor, notifications, registry,
};
use shared::{
    abstract_trait::{NewsletterServiceTrait, ReferralServiceTrait, TaxonomyServiceTrait},
    domain::requests::{
        CreateReferralRequest, CreateTaxonomyRequest, FindAllReferrals, UpdateTaxonomyRequest,
    },
    errors::ServiceError,
    model::TaxonomyKind,
    service::{
        HOMEPAGE_CACHE_KEY, NewsletterService, ReferralService, ReferralServiceDeps,
        TaxonomyService,
    },
};
use std::sync::Arc;

fn taxonomy(name: &str, slug: Option<&str>) -> CreateTaxonomyRequest {
    CreateTaxonomyRequest {
        name: name.into(),
        slug: slug.map(str::to_string),
        description: None,
        image_url: None,
    }
}

#[tokio::test]
async fn category_changes_drop_the_cached_homepage() {
    let cache = Arc::new(RecordingCache::default());
    let categories = TaxonomyService::new(
        TaxonomyKind::Category,
        Arc::new(TaxonomyStore::default()),
        cache.clone(),
        registry(),
    )
    .await;

    let created = categories
        .create(&taxonomy("Wound Care & Dressings", None))
        .await
        .unwrap()
        .data;
    assert_eq!(created.slug, "wound-care-dressings");

    categories
        .update(&UpdateTaxonomyRequest {
            id: created.id,
            name: "Wound Care".into(),
            slug: None,
            description: Some("Bandages, gauze and tape".into()),
            image_url: None,
        })
        .await
        .unwrap();
    categories.delete(created.id).await.unwrap();

    let deleted = cache.deleted.lock().unwrap().clone();
    assert_eq!(deleted, vec![HOMEPAGE_CACHE_KEY.to_string(); 3]);
}

#[tokio::test]
async fn category_slugs_are_unique_and_need_letters() {
    let cache = Arc::new(RecordingCache::default());
    let categories = TaxonomyService::new(
        TaxonomyKind::Category,
        Arc::new(TaxonomyStore::default()),
        cache.clone(),
        registry(),
    )
    .await;

    categories
        .create(&taxonomy("Diagnostics", None))
        .await
        .unwrap();

    assert!(matches!(
        categories
            .create(&taxonomy("Diagnostic tools", Some("Diagnostics")))
            .await
            .unwrap_err(),
        ServiceError::Conflict(_)
    ));
    assert!(matches!(
        categories.create(&taxonomy("???", None)).await.unwrap_err(),
        ServiceError::Validation(_)
    ));
    assert_eq!(cache.deleted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn brands_are_named_in_their_own_messages() {
    let brands = TaxonomyService::new(
        TaxonomyKind::Brand,
        Arc::new(TaxonomyStore::default()),
        Arc::new(RecordingCache::default()),
        registry(),
    )
    .await;

    let created = brands.create(&taxonomy("Littmann", None)).await.unwrap();
    assert_eq!(created.message, "Brand created");
    assert_eq!(created.data.slug, "littmann");

    match brands.find_by_id(99).await.unwrap_err() {
        ServiceError::NotFound(what) => assert_eq!(what, "Brand"),
        other => panic!("unexpected error: {other:?}"),
    }
    match brands
        .create(&taxonomy("3M Littmann", Some("littmann")))
        .await
        .unwrap_err()
    {
        ServiceError::Conflict(msg) => assert!(msg.contains("brand")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn newsletter_subscriptions_are_unique_per_email() {
    let store = Arc::new(NewsletterStore::default());
    let newsletter = NewsletterService::new(store.clone(), registry()).await;

    let row = newsletter
        .subscribe("  Wilson@PPTH.example ")
        .await
        .unwrap()
        .data;
    assert_eq!(row.email, "wilson@ppth.example");

    assert!(matches!(
        newsletter.subscribe("wilson@ppth.example").await.unwrap_err(),
        ServiceError::Conflict(_)
    ));

    newsletter.unsubscribe("WILSON@ppth.example").await.unwrap();
    assert!(store.rows.lock().unwrap().is_empty());

    assert!(matches!(
        newsletter
            .unsubscribe("wilson@ppth.example")
            .await
            .unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

async fn referrals(users: UserStore) -> (Arc<ReferralStore>, Arc<RecordingEmail>, ReferralService) {
    let store = Arc::new(ReferralStore::default());
    let email = Arc::new(RecordingEmail::default());

    let service = ReferralService::new(ReferralServiceDeps {
        repository: store.clone(),
        users: Arc::new(users),
        email: email.clone(),
        notifications: notifications(),
        registry: registry(),
    })
    .await;

    (store, email, service)
}

fn invite(name: &str, email: &str) -> CreateReferralRequest {
    CreateReferralRequest {
        referred_name: name.into(),
        referred_email: email.into(),
        message: Some("Their sterile kits are the best I have used.".into()),
    }
}

#[tokio::test]
async fn referral_mails_the_invited_colleague() {
    let (store, email, service) =
        referrals(UserStore::with(vec![doctor(1, "house@ppth.example", true)])).await;

    let referral = service
        .create(1, &invite("James Wilson", "Wilson@Oncology.example"))
        .await
        .unwrap()
        .data;

    assert_eq!(referral.referred_email, "wilson@oncology.example");
    assert_eq!(email.recipients(), vec!["wilson@oncology.example".to_string()]);

    let mail = email.sent.lock().unwrap()[0].clone();
    assert!(mail.data.message.contains("James Wilson"));
    assert!(mail.data.message.contains("sterile kits"));
    assert!(mail.data.link.ends_with("/register"));

    let mine = service
        .find_mine(
            1,
            &FindAllReferrals {
                page: 1,
                page_size: 10,
                search: String::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(mine.data.len(), 1);
    assert_eq!(store.rows.lock().unwrap()[0].referrer_id, 1);
}

#[tokio::test]
async fn existing_members_cannot_be_referred() {
    let (store, email, service) = referrals(UserStore::with(vec![
        doctor(1, "house@ppth.example", true),
        doctor(2, "cuddy@ppth.example", true),
    ]))
    .await;

    let err = service
        .create(1, &invite("Lisa Cuddy", "Cuddy@PPTH.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(store.rows.lock().unwrap().is_empty());
    assert!(email.recipients().is_empty());
}
