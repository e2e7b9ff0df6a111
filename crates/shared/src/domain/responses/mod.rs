mod api;
mod cart;
mod catalog;
mod dashboard;
mod homepage;
mod newsletter;
mod order;
mod pagination;
mod referral;
mod upload;
mod user;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::cart::{CartLineResponse, CartResponse};
pub use self::catalog::{ProductResponse, TaxonomyResponse};
pub use self::dashboard::{DashboardStatsResponse, OrderStatusCounts};
pub use self::homepage::{CarouselItemResponse, FeaturedProductResponse, HomepageResponse};
pub use self::newsletter::NewsletterResponse;
pub use self::order::{
    BankDetailsResponse, BuyerResponse, OrderDetailResponse, OrderItemResponse, OrderResponse,
};
pub use self::pagination::Pagination;
pub use self::referral::ReferralResponse;
pub use self::upload::UploadResponse;
pub use self::user::{AdminResponse, SessionResponse, UserResponse};
