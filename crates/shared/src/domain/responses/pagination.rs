use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::requests::page_window;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
    pub total_items: i64,
    pub total_pages: i32,
}

impl Pagination {
    pub fn new(page: i32, page_size: i32, total_items: i64) -> Self {
        let (limit, _) = page_window(page, page_size);
        let total_pages = if total_items <= 0 {
            0
        } else {
            ((total_items + limit - 1) / limit) as i32
        };

        Self {
            page: page.max(1),
            page_size: limit as i32,
            total_items,
            total_pages,
        }
    }
}
