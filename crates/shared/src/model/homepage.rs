use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CarouselItem {
    pub carousel_item_id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeaturedCarousel {
    pub featured_id: i32,
    pub product_id: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeaturedProduct {
    pub featured_id: i32,
    pub display_order: i32,
    pub featured_active: bool,
    #[sqlx(flatten)]
    pub product: crate::model::Product,
}
