//! Dataset store abstraction
//!
//! The physical operations (`insert_batch`, the paged queries) are provided by
//! each backend. Batched saving is layered on top of `insert_batch` so every
//! backend chunks the same way.

use async_trait::async_trait;
use std::time::Instant;

use crate::db::models::{Dataset, NewDataset};
use crate::errors::Result;
use crate::metrics;
use crate::pagination::{Page, PageRequest};

#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Maximum number of records handed to a single `insert_batch` call.
    ///
    /// This is the only place the chunk size is read; callers configure it on
    /// the store (`catalog.batch_size` for the SeaORM repository).
    fn batch_size(&self) -> usize;

    /// One page of all datasets in ascending id order
    async fn find_all(&self, page: PageRequest) -> Result<Page<Dataset>>;

    /// One page of datasets whose name or description contains `query`,
    /// ignoring case, in ascending id order
    async fn find_matching(&self, query: &str, page: PageRequest) -> Result<Page<Dataset>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Dataset>>;

    async fn count(&self) -> Result<u64>;

    /// Insert a single record and return it with its assigned id
    async fn insert(&self, record: NewDataset) -> Result<Dataset>;

    /// One physical multi-row insert. Returns the number of rows written.
    async fn insert_batch(&self, records: &[NewDataset]) -> Result<u64>;

    /// Persist `records` in order, `batch_size()` at a time.
    ///
    /// Chunks run one after another. If a chunk fails, the chunks before it
    /// stay committed and the rest are skipped.
    async fn save_all_batched(&self, records: Vec<NewDataset>) -> Result<u64> {
        let batch_size = self.batch_size().max(1);
        let total_chunks = records.len().div_ceil(batch_size);
        let start = Instant::now();
        let mut inserted = 0u64;

        for (chunk_index, chunk) in records.chunks(batch_size).enumerate() {
            match self.insert_batch(chunk).await {
                Ok(rows) => {
                    inserted += rows;
                    tracing::debug!(
                        chunk = chunk_index + 1,
                        total_chunks,
                        rows,
                        "Dataset chunk committed"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        failed_chunk = chunk_index + 1,
                        committed_chunks = chunk_index,
                        committed_records = inserted,
                        total_chunks,
                        "Batched dataset save aborted"
                    );
                    metrics::record_batch_save(start.elapsed().as_secs_f64(), chunk_index, inserted, false);
                    return Err(e);
                }
            }
        }

        metrics::record_batch_save(start.elapsed().as_secs_f64(), total_chunks, inserted, true);
        tracing::info!(inserted, chunks = total_chunks, batch_size, "Batched dataset save complete");
        Ok(inserted)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingStore;
    use super::*;
    use rand::Rng;

    fn records(n: usize) -> Vec<NewDataset> {
        (0..n)
            .map(|i| NewDataset::new(format!("dataset-{i}"), format!("row {i}"), i as i32))
            .collect()
    }

    #[tokio::test]
    async fn test_2500_records_make_three_ordered_inserts() {
        let store = RecordingStore::default();

        let inserted = store.save_all_batched(records(2500)).await.unwrap();

        assert_eq!(inserted, 2500);
        assert_eq!(store.calls(), vec![1000, 1000, 500]);

        // Input order is preserved across chunk boundaries
        let rows = store.rows.lock().unwrap();
        assert_eq!(rows[999].name, "dataset-999");
        assert_eq!(rows[1000].name, "dataset-1000");
        assert_eq!(rows[2499].name, "dataset-2499");
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_call() {
        let store = RecordingStore::default();
        store.save_all_batched(records(2000)).await.unwrap();
        assert_eq!(store.calls(), vec![1000, 1000]);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let store = RecordingStore::default();
        let inserted = tokio_test::assert_ok!(store.save_all_batched(Vec::new()).await);
        assert_eq!(inserted, 0);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_chunk_keeps_earlier_chunks_and_skips_later() {
        let store = RecordingStore::failing_on(2);

        let err = store.save_all_batched(records(2500)).await.unwrap_err();

        assert!(err.to_string().contains("injected failure on insert call 2"));
        // Chunk 3 was never attempted
        assert_eq!(store.calls(), vec![1000, 1000]);
        // Chunk 1 stays committed
        assert_eq!(store.count().await.unwrap(), 1000);
    }

    #[tokio::test]
    async fn test_random_sizes_respect_batch_limit() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let batch_size = rng.gen_range(1..=50);
            let n = rng.gen_range(0..=500);
            let store = RecordingStore { batch_size: Some(batch_size), ..Default::default() };

            store.save_all_batched(records(n)).await.unwrap();

            let calls = store.calls();
            assert_eq!(calls.iter().sum::<usize>(), n);
            assert_eq!(calls.len(), n.div_ceil(batch_size));
            assert!(calls.iter().all(|&c| c >= 1 && c <= batch_size));
            // Only the last chunk may be short
            if let Some((_, full)) = calls.split_last() {
                assert!(full.iter().all(|&c| c == batch_size));
            }
        }
    }
}
