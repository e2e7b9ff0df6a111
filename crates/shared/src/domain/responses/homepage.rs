use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ProductResponse, TaxonomyResponse};
use crate::model::{CarouselItem, FeaturedProduct};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CarouselItemResponse {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<CarouselItem> for CarouselItemResponse {
    fn from(value: CarouselItem) -> Self {
        CarouselItemResponse {
            id: value.carousel_item_id,
            title: value.title,
            subtitle: value.subtitle,
            image_url: value.image_url,
            link_url: value.link_url,
            button_text: value.button_text,
            background_color: value.background_color,
            text_color: value.text_color,
            display_order: value.display_order,
            is_active: value.is_active,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct FeaturedProductResponse {
    pub id: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub product: ProductResponse,
}

impl From<FeaturedProduct> for FeaturedProductResponse {
    fn from(value: FeaturedProduct) -> Self {
        FeaturedProductResponse {
            id: value.featured_id,
            display_order: value.display_order,
            is_active: value.featured_active,
            product: ProductResponse::from(value.product),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HomepageResponse {
    pub carousel: Vec<CarouselItemResponse>,
    pub featured: Vec<FeaturedProductResponse>,
    pub categories: Vec<TaxonomyResponse>,
    pub brands: Vec<TaxonomyResponse>,
}
