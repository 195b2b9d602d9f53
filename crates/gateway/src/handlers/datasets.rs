//! Dataset handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::instrument;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;
use catalog_common::{errors::Result, Dataset, NewDataset, Page};

/// Query parameters for listing and searching
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: u64,

    #[serde(default = "default_size")]
    pub size: u64,

    /// Substring matched against name or description, ignoring case
    pub search: Option<String>,
}

fn default_size() -> u64 { 10 }

/// List datasets, optionally filtered by `search`
#[instrument(skip(state))]
pub async fn list_datasets(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Page<Dataset>>> {
    let page = state
        .datasets
        .list(params.page, params.size, params.search.as_deref())
        .await?;

    Ok(Json(page))
}

/// Store datasets in chunks. Responds with an empty 200.
#[instrument(skip(state, records))]
pub async fn create_datasets_in_batches(
    State(state): State<AppState>,
    ApiJson(records): ApiJson<Vec<NewDataset>>,
) -> Result<StatusCode> {
    tracing::debug!(count = records.len(), "Received dataset batch");
    let inserted = state.datasets.create_batch(records).await?;

    tracing::info!(inserted, "Dataset batch stored");
    Ok(StatusCode::OK)
}

/// Create a single dataset
#[instrument(skip(state, record))]
pub async fn create_dataset(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<NewDataset>,
) -> Result<(StatusCode, Json<Dataset>)> {
    let dataset = state.datasets.create(record).await?;
    Ok((StatusCode::CREATED, Json(dataset)))
}

/// Get a dataset by id
#[instrument(skip(state))]
pub async fn get_dataset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Dataset>> {
    let dataset = state.datasets.get(id).await?;
    Ok(Json(dataset))
}
