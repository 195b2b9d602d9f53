//! SeaORM-backed dataset store
//!
//! Provides a clean interface for all data access operations
//! with proper error handling.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, IdenStatic, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};
use std::time::Instant;

use crate::db::models::*;
use crate::db::store::DatasetStore;
use crate::db::DbPool;
use crate::errors::Result;
use crate::metrics;
use crate::pagination::{Page, PageRequest};
use crate::DEFAULT_BATCH_SIZE;

/// Repository for dataset persistence
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
    batch_size: usize,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool, batch_size: DEFAULT_BATCH_SIZE }
    }

    /// Override the number of records written per insert statement
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    async fn fetch_page(
        &self,
        select: Select<DatasetEntity>,
        page: PageRequest,
        kind: &'static str,
    ) -> Result<Page<Dataset>> {
        let start = Instant::now();

        let paginator = select
            .order_by_asc(DatasetColumn::Id)
            .paginate(self.read_conn(), page.size);

        let total = paginator.num_items().await?;
        // Past the last row there is nothing to fetch, and the offset may not
        // fit in the paginator's arithmetic.
        let content = if page.offset() >= total {
            Vec::new()
        } else {
            paginator.fetch_page(page.page).await?
        };

        metrics::record_query(kind, start.elapsed().as_secs_f64(), content.len());
        Ok(Page::new(content, page, total))
    }
}

/// Case-insensitive `contains` over name OR description.
///
/// Both the column and the bound pattern go through the database's `LOWER`,
/// so the two sides fold case identically on every backend (SQLite only folds
/// ASCII). LIKE metacharacters in the query match literally.
fn name_or_description_contains(query: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(query));

    Condition::any()
        .add(lower_like(DatasetColumn::Name, &pattern))
        .add(lower_like(DatasetColumn::Description, &pattern))
}

fn lower_like(column: DatasetColumn, pattern: &str) -> SimpleExpr {
    Expr::cust_with_values(
        format!(r#"LOWER("{}") LIKE LOWER(?) ESCAPE ?"#, column.as_str()),
        [pattern.to_owned(), LIKE_ESCAPE.to_string()],
    )
}

const LIKE_ESCAPE: char = '\\';

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl DatasetStore for Repository {
    fn batch_size(&self) -> usize {
        self.batch_size
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Dataset>> {
        self.fetch_page(DatasetEntity::find(), page, "all").await
    }

    async fn find_matching(&self, query: &str, page: PageRequest) -> Result<Page<Dataset>> {
        let select = DatasetEntity::find().filter(name_or_description_contains(query));
        self.fetch_page(select, page, "search").await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Dataset>> {
        DatasetEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    async fn count(&self) -> Result<u64> {
        let total = DatasetEntity::find().count(self.read_conn()).await?;
        Ok(total as u64)
    }

    async fn insert(&self, record: NewDataset) -> Result<Dataset> {
        record
            .to_active_model()
            .insert(self.write_conn())
            .await
            .map_err(Into::into)
    }

    async fn insert_batch(&self, records: &[NewDataset]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let rows = DatasetEntity::insert_many(records.iter().map(NewDataset::to_active_model))
            .exec_without_returning(self.write_conn())
            .await?;

        Ok(rows)
    }
}
