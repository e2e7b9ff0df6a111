use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{Product, Taxonomy};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    /// Cents.
    pub price: i64,
    pub stock: i32,
    pub in_stock: bool,
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            sku: value.sku,
            price: value.price,
            stock: value.stock,
            in_stock: value.stock > 0,
            image_url: value.image_url,
            category_id: value.category_id,
            brand_id: value.brand_id,
            is_featured: value.is_featured,
            is_active: value.is_active,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

/// A category or brand.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TaxonomyResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Taxonomy> for TaxonomyResponse {
    fn from(value: Taxonomy) -> Self {
        TaxonomyResponse {
            id: value.id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            image_url: value.image_url,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
