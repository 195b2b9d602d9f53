//! Dataset Catalog Common Library
//!
//! Shared code for the catalog services including:
//! - Dataset entity model and store
//! - Pagination types
//! - The dataset service (validation and search policy)
//! - Error types and handling
//! - Configuration management
//! - Metrics

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod pagination;
pub mod service;

// Re-export commonly used types
pub use errors::{AppError, Result};
pub use config::AppConfig;
pub use db::{DatasetStore, DbPool, Repository};
pub use db::models::{Dataset, NewDataset};
pub use pagination::{Page, PageRequest};
pub use service::DatasetService;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of datasets written by one insert statement
pub const DEFAULT_BATCH_SIZE: usize = 1000;
