use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::{default_page, default_page_size};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl ProductSort {
    /// `ORDER BY` fragment; never built from user text.
    pub fn order_by(self) -> &'static str {
        match self {
            ProductSort::Newest => "p.created_at DESC, p.product_id DESC",
            ProductSort::PriceAsc => "p.price ASC, p.product_id ASC",
            ProductSort::PriceDesc => "p.price DESC, p.product_id DESC",
            ProductSort::Name => "p.name ASC, p.product_id ASC",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[validate(schema(function = "validate_price_range"))]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,

    #[validate(range(min = 0))]
    pub min_price: Option<i64>,

    #[validate(range(min = 0))]
    pub max_price: Option<i64>,

    pub featured: Option<bool>,

    #[serde(default)]
    pub sort: ProductSort,
}

fn validate_price_range(req: &FindAllProducts) -> Result<(), ValidationError> {
    match (req.min_price, req.max_price) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::new("price_range")
            .with_message("min_price cannot exceed max_price".into())),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Sterile gauze pads 10x10")]
    pub name: String,

    #[validate(length(max = 255))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub sku: Option<String>,

    /// Price in cents.
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 1299)]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 50)]
    pub stock: i32,

    pub image_url: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(max = 255))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub sku: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    pub image_url: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub is_featured: bool,
    pub is_active: bool,
}

/// Body shared by category and brand creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaxonomyRequest {
    #[validate(length(min = 1, max = 150, message = "Name is required"))]
    #[schema(example = "Wound care")]
    pub name: String,

    #[validate(length(max = 150))]
    pub slug: Option<String>,

    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTaxonomyRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(length(min = 1, max = 150, message = "Name is required"))]
    pub name: String,

    #[validate(length(max = 150))]
    pub slug: Option<String>,

    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateImageRequest {
    #[validate(length(min = 1, message = "Image URL is required"))]
    #[schema(example = "/uploads/2d7c5a9e.png")]
    pub image_url: String,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_price_range_is_rejected() {
        let req = FindAllProducts {
            min_price: Some(5_000),
            max_price: Some(1_000),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let ok = FindAllProducts {
            min_price: Some(1_000),
            max_price: Some(5_000),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn sort_parses_snake_case() {
        let sort: ProductSort = serde_json::from_str("\"price_desc\"").unwrap();
        assert_eq!(sort, ProductSort::PriceDesc);
        assert_eq!(ProductSort::default(), ProductSort::Newest);
    }
}
