//! Paginated response envelope

use serde::{Deserialize, Serialize};

/// Pagination metadata
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Total number of matching items (across all pages)
    pub total: u64,
    /// Total number of pages (0 when there are no items)
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on the requested page
    pub items: Vec<T>,
    /// Total number of matching items
    pub total: u64,
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let meta = Pagination::new(page, limit, total);
        Self {
            items,
            total,
            page,
            limit,
            total_pages: meta.total_pages,
        }
    }
}
