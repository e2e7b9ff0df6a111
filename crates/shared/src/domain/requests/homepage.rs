use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCarouselItemRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    #[schema(example = "Winter restock")]
    pub title: String,

    #[validate(length(max = 500))]
    pub subtitle: Option<String>,

    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image_url: String,

    pub link_url: Option<String>,

    #[validate(length(max = 100))]
    pub button_text: Option<String>,

    #[validate(length(max = 20))]
    pub background_color: Option<String>,

    #[validate(length(max = 20))]
    pub text_color: Option<String>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCarouselItemRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(max = 500))]
    pub subtitle: Option<String>,

    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image_url: String,

    pub link_url: Option<String>,

    #[validate(length(max = 100))]
    pub button_text: Option<String>,

    #[validate(length(max = 20))]
    pub background_color: Option<String>,

    #[validate(length(max = 20))]
    pub text_color: Option<String>,

    pub display_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarouselPosition {
    pub id: i32,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReorderCarouselRequest {
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<CarouselPosition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFeaturedRequest {
    #[validate(range(min = 1, message = "Product ID is required"))]
    pub product_id: i32,

    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFeaturedRequest {
    #[serde(skip)]
    pub id: i32,

    pub display_order: i32,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
