use serde::{Deserialize, Serialize};

/// Pagination query parameters. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, FromForm)]
pub struct PaginationRequest {
    #[field(default = 1, validate = range(1..))]
    page_num: u32,
    #[field(default = 50, validate = range(1..))]
    page_size: u32,
}

impl PaginationRequest {
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items before the start of this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page_num - 1) * u64::from(self.page_size)
    }

    /// Wrap a page of items with the pagination metadata.
    pub fn to_paginated<T>(self, total: u64, items: Vec<T>) -> Paginated<T> {
        Paginated {
            pagination: PaginationResult {
                page_num: self.page_num,
                page_size: self.page_size,
                total,
            },
            items,
        }
    }
}

/// Pagination metadata returned alongside a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult {
    pub page_num: u32,
    pub page_size: u32,
    pub total: u64,
}

/// A single page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub pagination: PaginationResult,
    pub items: Vec<T>,
}
