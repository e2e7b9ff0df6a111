use crate::{
    abstract_trait::{
        DynAdminAuthService, DynAdminRepository, DynAuthService, DynCacheStore,
        DynCarouselRepository, DynCartRepository, DynCartService, DynDashboardRepository,
        DynDashboardService, DynDoctorAdminService, DynEmailService, DynFeaturedRepository,
        DynHashing, DynHomepageService, DynNewsletterRepository, DynNewsletterService,
        DynReferralRepository, DynReferralService, DynSessionStore, DynTaxonomyRepository,
        DynTaxonomyService, DynUploadService,
    },
    config::{AdminFallbackConfig, BankConfig, ConnectionPool},
    domain::notifications::Notifications,
    model::TaxonomyKind,
    repository::{
        AdminRepository, CarouselRepository, CartRepository, DashboardRepository,
        FeaturedRepository, NewsletterRepository, OrderRepository, ProductRepository,
        ReferralRepository, TaxonomyRepository, UserRepository,
    },
    service::{
        AdminAuthService, AdminAuthServiceDeps, AuthService, AuthServiceDeps, CartService,
        DashboardService, DoctorAdminService, DoctorAdminServiceDeps, HomepageService,
        HomepageServiceDeps, NewsletterService, OrderCommandServiceDeps, OrderService,
        ProductService, ReferralService, ReferralServiceDeps, TaxonomyService, UploadService,
    },
};
use chrono::Duration;
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub admin_auth_service: DynAdminAuthService,
    pub doctor_admin_service: DynDoctorAdminService,
    pub product_service: ProductService,
    pub category_service: DynTaxonomyService,
    pub brand_service: DynTaxonomyService,
    pub cart_service: DynCartService,
    pub order_service: OrderService,
    pub homepage_service: DynHomepageService,
    pub newsletter_service: DynNewsletterService,
    pub referral_service: DynReferralService,
    pub dashboard_service: DynDashboardService,
    pub upload_service: DynUploadService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("admin_auth_service", &"<AdminAuthService>")
            .field("product_service", &"<ProductService>")
            .field("cart_service", &"<CartService>")
            .field("order_service", &"<OrderService>")
            .field("homepage_service", &"<HomepageService>")
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hash: DynHashing,
    pub email: DynEmailService,
    pub cache: DynCacheStore,
    pub sessions: DynSessionStore,
    pub notifications: Notifications,
    pub bank: BankConfig,
    pub admin_fallback: AdminFallbackConfig,
    pub session_ttl: Duration,
    pub upload_dir: String,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            pool,
            hash,
            email,
            cache,
            sessions,
            notifications,
            bank,
            admin_fallback,
            session_ttl,
            upload_dir,
            registry,
        } = deps;

        let user_repository = UserRepository::new(pool.clone());
        let product_repository = ProductRepository::new(pool.clone());
        let order_repository = OrderRepository::new(pool.clone());
        let admin_repository = Arc::new(AdminRepository::new(pool.clone())) as DynAdminRepository;
        let category_repository = Arc::new(TaxonomyRepository::new(
            pool.clone(),
            TaxonomyKind::Category,
        )) as DynTaxonomyRepository;
        let brand_repository = Arc::new(TaxonomyRepository::new(
            pool.clone(),
            TaxonomyKind::Brand,
        )) as DynTaxonomyRepository;
        let cart_repository = Arc::new(CartRepository::new(pool.clone())) as DynCartRepository;
        let carousel_repository =
            Arc::new(CarouselRepository::new(pool.clone())) as DynCarouselRepository;
        let featured_repository =
            Arc::new(FeaturedRepository::new(pool.clone())) as DynFeaturedRepository;
        let newsletter_repository =
            Arc::new(NewsletterRepository::new(pool.clone())) as DynNewsletterRepository;
        let referral_repository =
            Arc::new(ReferralRepository::new(pool.clone())) as DynReferralRepository;
        let dashboard_repository =
            Arc::new(DashboardRepository::new(pool.clone())) as DynDashboardRepository;

        let auth_deps = AuthServiceDeps {
            query: user_repository.query.clone(),
            command: user_repository.command.clone(),
            hash: hash.clone(),
            sessions: sessions.clone(),
            email: email.clone(),
            notifications: notifications.clone(),
            session_ttl,
            registry: registry.clone(),
        };
        let auth_service = Arc::new(AuthService::new(auth_deps).await) as DynAuthService;

        let admin_auth_deps = AdminAuthServiceDeps {
            repository: admin_repository,
            hash,
            sessions: sessions.clone(),
            fallback: admin_fallback,
            session_ttl,
            registry: registry.clone(),
        };
        let admin_auth_service =
            Arc::new(AdminAuthService::new(admin_auth_deps).await) as DynAdminAuthService;

        let doctor_admin_service = Arc::new(
            DoctorAdminService::new(DoctorAdminServiceDeps {
                query: user_repository.query.clone(),
                command: user_repository.command.clone(),
                sessions: sessions.clone(),
                email: email.clone(),
                notifications: notifications.clone(),
                registry: registry.clone(),
            })
            .await,
        ) as DynDoctorAdminService;

        let product_service = ProductService::new(
            product_repository.query.clone(),
            product_repository.command.clone(),
            cache.clone(),
            registry.clone(),
        )
        .await;

        let category_service = Arc::new(
            TaxonomyService::new(
                TaxonomyKind::Category,
                category_repository.clone(),
                cache.clone(),
                registry.clone(),
            )
            .await,
        ) as DynTaxonomyService;

        let brand_service = Arc::new(
            TaxonomyService::new(
                TaxonomyKind::Brand,
                brand_repository.clone(),
                cache.clone(),
                registry.clone(),
            )
            .await,
        ) as DynTaxonomyService;

        let cart_service = Arc::new(
            CartService::new(
                cart_repository.clone(),
                product_repository.query.clone(),
                registry.clone(),
            )
            .await,
        ) as DynCartService;

        let order_deps = OrderCommandServiceDeps {
            query: order_repository.query.clone(),
            command: order_repository.command.clone(),
            cart: cart_repository,
            users: user_repository.query.clone(),
            email: email.clone(),
            notifications: notifications.clone(),
            bank: bank.clone(),
            cache: cache.clone(),
        };
        let order_service = OrderService::new(
            order_repository.query.clone(),
            bank,
            order_deps,
            registry.clone(),
        )
        .await;

        let homepage_deps = HomepageServiceDeps {
            carousel: carousel_repository,
            featured: featured_repository,
            categories: category_repository,
            brands: brand_repository,
            cache,
            registry: registry.clone(),
        };
        let homepage_service =
            Arc::new(HomepageService::new(homepage_deps).await) as DynHomepageService;

        let newsletter_service =
            Arc::new(NewsletterService::new(newsletter_repository, registry.clone()).await)
                as DynNewsletterService;

        let referral_deps = ReferralServiceDeps {
            repository: referral_repository,
            users: user_repository.query.clone(),
            email,
            notifications,
            registry: registry.clone(),
        };
        let referral_service =
            Arc::new(ReferralService::new(referral_deps).await) as DynReferralService;

        let dashboard_service =
            Arc::new(DashboardService::new(dashboard_repository, registry.clone()).await)
                as DynDashboardService;

        let upload_service =
            Arc::new(UploadService::new(upload_dir, registry).await) as DynUploadService;

        Self {
            auth_service,
            admin_auth_service,
            doctor_admin_service,
            product_service,
            category_service,
            brand_service,
            cart_service,
            order_service,
            homepage_service,
            newsletter_service,
            referral_service,
            dashboard_service,
            upload_service,
        }
    }
}
