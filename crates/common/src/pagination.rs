//! Page request and page response types
//!
//! The response shape follows the common `content` / `totalElements` /
//! `totalPages` convention so existing front ends can consume it unchanged.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};

/// Zero-based page index plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Build a page request, rejecting sizes outside `1..=max_size`
    pub fn new(page: u64, size: u64, max_size: u64) -> Result<Self> {
        if size == 0 {
            return Err(AppError::InvalidPagination {
                message: "page size must be at least 1".to_string(),
            });
        }
        if size > max_size {
            return Err(AppError::InvalidPagination {
                message: format!("page size {} exceeds maximum of {}", size, max_size),
            });
        }
        Ok(Self { page, size })
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based index of this page
    pub number: u64,
    pub size: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size.max(1));
        let number_of_elements = content.len() as u64;

        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            number_of_elements,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }
}
