mod admin;
mod auth;
mod cache;
mod cart;
mod dashboard;
mod email;
mod hashing;
mod homepage;
mod kafka;
mod newsletter;
mod order;
mod product;
mod rate_limit;
mod referral;
mod session;
mod taxonomy;
mod upload;
mod user;

pub use self::admin::{AdminRepositoryTrait, DynAdminRepository};
pub use self::auth::{
    AdminAuthServiceTrait, AuthServiceTrait, DynAdminAuthService, DynAuthService,
};
pub use self::cache::{CacheStoreTrait, DynCacheStore};
pub use self::cart::{CartRepositoryTrait, CartServiceTrait, DynCartRepository, DynCartService};
pub use self::dashboard::{
    DashboardRepositoryTrait, DashboardServiceTrait, DynDashboardRepository, DynDashboardService,
};
pub use self::email::{DynEmailService, EmailRequest, EmailServiceTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::homepage::{
    CarouselRepositoryTrait, DynCarouselRepository, DynFeaturedRepository, DynHomepageService,
    FeaturedRepositoryTrait, HomepageServiceTrait,
};
pub use self::kafka::{DynKafka, KafkaTrait};
pub use self::newsletter::{
    DynNewsletterRepository, DynNewsletterService, NewsletterRepositoryTrait,
    NewsletterServiceTrait,
};
pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, OrderCommandRepositoryTrait, OrderCommandServiceTrait,
    OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::rate_limit::{DynRateLimiter, RateLimiterTrait};
pub use self::referral::{
    DynReferralRepository, DynReferralService, ReferralRepositoryTrait, ReferralServiceTrait,
};
pub use self::session::{DynSessionStore, SessionStoreTrait};
pub use self::taxonomy::{
    DynTaxonomyRepository, DynTaxonomyService, TaxonomyRepositoryTrait, TaxonomyServiceTrait,
};
pub use self::upload::{DynUploadService, UploadServiceTrait};
pub use self::user::{
    DoctorAdminServiceTrait, DynDoctorAdminService, DynUserCommandRepository,
    DynUserQueryRepository, UserCommandRepositoryTrait, UserQueryRepositoryTrait,
};
