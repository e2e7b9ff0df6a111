mod auth;
mod cart;
mod dashboard;
mod email;
mod homepage;
mod newsletter;
mod order;
mod product;
mod referral;
mod taxonomy;
mod upload;
mod user;

pub use self::auth::{
    AdminAuthService, AdminAuthServiceDeps, AuthService, AuthServiceDeps, FALLBACK_ADMIN_ID,
};
pub use self::cart::CartService;
pub use self::dashboard::DashboardService;
pub use self::email::{EmailDispatcher, send_optional, send_quietly};
pub use self::homepage::{HOMEPAGE_CACHE_KEY, HomepageService, HomepageServiceDeps};
pub use self::newsletter::NewsletterService;
pub use self::order::{OrderCommandServiceDeps, OrderService};
pub use self::product::ProductService;
pub use self::referral::{ReferralService, ReferralServiceDeps};
pub use self::taxonomy::TaxonomyService;
pub use self::upload::{ImageKind, MAX_IMAGE_BYTES, UPLOADS_ROUTE, UploadService};
pub use self::user::{DoctorAdminService, DoctorAdminServiceDeps};

use crate::{
    errors::{RepositoryError, ServiceError},
    utils::resolve_slug,
};

pub(crate) fn require_slug(explicit: Option<&str>, name: &str) -> Result<String, ServiceError> {
    resolve_slug(explicit, name)
        .ok_or_else(|| ServiceError::validation("Name must contain letters or digits"))
}

/// Unique violations become a 409 with `message`; everything else passes through.
pub(crate) fn duplicate_as_conflict(err: RepositoryError, message: &str) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(_) => ServiceError::Conflict(message.to_string()),
        other => ServiceError::Repo(other),
    }
}
