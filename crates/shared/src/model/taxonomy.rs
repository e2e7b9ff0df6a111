use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The lookup tables products are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    Category,
    Brand,
}

impl TaxonomyKind {
    pub fn table(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "categories",
            TaxonomyKind::Brand => "brands",
        }
    }

    pub fn id_column(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "category_id",
            TaxonomyKind::Brand => "brand_id",
        }
    }

    /// Lowercase singular, used for log lines and span attributes.
    pub fn name(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "category",
            TaxonomyKind::Brand => "brand",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "Category",
            TaxonomyKind::Brand => "Brand",
        }
    }

    pub fn service_name(self) -> &'static str {
        match self {
            TaxonomyKind::Category => "category_service",
            TaxonomyKind::Brand => "brand_service",
        }
    }
}

/// A category or brand row. The id column is selected as `id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Taxonomy {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
