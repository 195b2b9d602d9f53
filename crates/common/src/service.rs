//! Dataset service
//!
//! Sits between the HTTP handlers and the store: applies pagination limits,
//! decides between listing and searching, and enforces field validation.

use std::sync::Arc;
use validator::Validate;

use crate::config::CatalogConfig;
use crate::db::models::{Dataset, NewDataset};
use crate::db::DatasetStore;
use crate::errors::{violations_from, AppError, Result};
use crate::pagination::{Page, PageRequest};

#[derive(Clone)]
pub struct DatasetService {
    store: Arc<dyn DatasetStore>,
    config: CatalogConfig,
}

impl DatasetService {
    pub fn new(store: Arc<dyn DatasetStore>, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    /// List datasets, filtering by `search` only when it is present and non-empty
    pub async fn list(&self, page: u64, size: u64, search: Option<&str>) -> Result<Page<Dataset>> {
        let request = PageRequest::new(page, size, self.config.max_page_size)?;

        match search {
            Some(query) if !query.is_empty() => self.store.find_matching(query, request).await,
            _ => self.store.find_all(request).await,
        }
    }

    /// Store a batch of datasets. Returns how many rows were written.
    pub async fn create_batch(&self, records: Vec<NewDataset>) -> Result<u64> {
        if self.config.validate_batch_records {
            let violations: Vec<_> = records
                .iter()
                .enumerate()
                .filter_map(|(i, r)| r.validate().err().map(|e| violations_from(Some(i), &e)))
                .flatten()
                .collect();

            if !violations.is_empty() {
                return Err(AppError::from_violations(violations));
            }
        }

        self.store.save_all_batched(records).await
    }

    /// Store a single dataset. Always validated.
    pub async fn create(&self, record: NewDataset) -> Result<Dataset> {
        record.validate()?;
        let stored = self.store.insert(record).await?;
        tracing::info!(id = stored.id, name = %stored.name, "Dataset created");
        Ok(stored)
    }

    pub async fn get(&self, id: i64) -> Result<Dataset> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::DatasetNotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::testing::RecordingStore;

    fn service_with(store: Arc<RecordingStore>, validate: bool) -> DatasetService {
        let config = CatalogConfig { validate_batch_records: validate, ..CatalogConfig::default() };
        DatasetService::new(store, config)
    }

    fn blank_name_batch() -> Vec<NewDataset> {
        vec![NewDataset::new("A", "a", 5), NewDataset::new("", "b", 0)]
    }

    #[tokio::test]
    async fn test_empty_search_falls_back_to_find_all() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(store.clone(), true);
        service
            .create_batch(vec![NewDataset::new("alpha", "x", 1), NewDataset::new("beta", "y", 2)])
            .await
            .unwrap();

        let unfiltered = service.list(0, 10, Some("")).await.unwrap();
        assert_eq!(unfiltered.total_elements, 2);

        let absent = service.list(0, 10, None).await.unwrap();
        assert_eq!(absent.total_elements, 2);

        let filtered = service.list(0, 10, Some("ALPHA")).await.unwrap();
        assert_eq!(filtered.total_elements, 1);
        assert_eq!(filtered.content[0].name, "alpha");
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let service = service_with(Arc::new(RecordingStore::default()), true);
        let err = service.list(0, 0, None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPagination { .. }));
    }

    #[tokio::test]
    async fn test_validated_batch_rejects_blank_name_before_writing() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(store.clone(), true);

        let err = service.create_batch(blank_name_batch()).await.unwrap_err();

        match err {
            AppError::Validation { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].index, Some(1));
                assert_eq!(violations[0].field, "name");
                assert_eq!(violations[0].message, "Name is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.calls().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unvalidated_batch_persists_blank_name() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(store.clone(), false);

        let inserted = service.create_batch(blank_name_batch()).await.unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(store.calls(), vec![2]);
        let stored = store.find_by_id(2).await.unwrap().unwrap();
        assert_eq!(stored.name, "");
        assert_eq!(stored.description, "b");
    }

    #[tokio::test]
    async fn test_single_create_is_always_validated() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(store.clone(), false);

        let err = service.create(NewDataset::new("ok", "   ", 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: description: Description is required");

        let created = service.create(NewDataset::new("ok", "fine", -4)).await.unwrap();
        assert_eq!(created.records, -4);
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_missing_dataset_is_not_found() {
        let service = service_with(Arc::new(RecordingStore::default()), true);
        let err = service.get(12).await.unwrap_err();
        assert!(matches!(err, AppError::DatasetNotFound { id: 12 }));
    }

    #[tokio::test]
    async fn test_existing_plus_batch_counts_add_up() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(store.clone(), true);

        let existing: Vec<NewDataset> = (0..7).map(|i| NewDataset::new(format!("e{i}"), "old", i)).collect();
        service.create_batch(existing).await.unwrap();

        let batch: Vec<NewDataset> = (0..1500).map(|i| NewDataset::new(format!("n{i}"), "new", i)).collect();
        service.create_batch(batch).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1507);
        assert_eq!(store.calls(), vec![7, 1000, 500]);
        assert_eq!(service.get(1507).await.unwrap().name, "n1499");
    }
}
