mod auth;
mod cart;
mod catalog;
mod homepage;
mod newsletter;
mod order;
mod referral;
mod user;

pub use self::auth::{
    AdminLoginRequest, CreateAdminRequest, LoginRequest, RegisterDoctorRequest,
    UpdateProfileRequest,
};
pub use self::cart::{AddToCartRequest, UpdateCartItemRequest};
pub use self::catalog::{
    CreateProductRequest, CreateTaxonomyRequest, FindAllProducts, ProductSort,
    UpdateImageRequest, UpdateProductRequest, UpdateTaxonomyRequest,
};
pub use self::homepage::{
    CarouselPosition, CreateCarouselItemRequest, CreateFeaturedRequest,
    ReorderCarouselRequest, UpdateCarouselItemRequest, UpdateFeaturedRequest,
};
pub use self::newsletter::{FindAllNewsletters, SubscribeRequest};
pub use self::order::{
    CancelOrderRequest, CheckoutRequest, DeclineOrderRequest, FindAllOrders, NewOrder,
    NewOrderItem, SubmitPaymentRequest,
};
pub use self::referral::{CreateReferralRequest, FindAllReferrals};
pub use self::user::{CreateDoctorRecord, FindAllUsers};

pub(crate) const MAX_PAGE_SIZE: i32 = 100;

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_page_size() -> i32 {
    10
}

/// Clamps paging input and returns `(limit, offset)` for SQL.
pub fn page_window(page: i32, page_size: i32) -> (i64, i64) {
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE) as i64;
    let page = page.max(1) as i64;
    (page_size, (page - 1) * page_size)
}

pub(crate) fn search_pattern(search: &str) -> Option<String> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_clamps_bad_input() {
        assert_eq!(page_window(1, 10), (10, 0));
        assert_eq!(page_window(3, 20), (20, 40));
        assert_eq!(page_window(0, 10), (10, 0));
        assert_eq!(page_window(-4, 0), (1, 0));
        assert_eq!(page_window(2, 1_000), (100, 100));
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(search_pattern("   "), None);
        assert_eq!(search_pattern(" gauze "), Some("gauze".to_string()));
    }
}
