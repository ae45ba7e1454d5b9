use std::sync::Arc;

use axum::{Json, extract::State};
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

#[derive(Serialize, Debug)]
pub struct ResultSummary {
    pub id: Uuid,
    pub original_filename: String,
    pub created_at: Timestamp,
}

/// `GET /admin/results`: stored results without their data, newest first.
pub async fn results_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ResultSummary>>, ApiError> {
    let mut results: Vec<ResultSummary> = state
        .store
        .list()
        .await?
        .into_iter()
        .map(|result| ResultSummary {
            id: result.id,
            original_filename: result.original_filename,
            created_at: result.created_at,
        })
        .collect();

    results.sort_by(|result1, result2| result2.created_at.cmp(&result1.created_at));

    Ok(Json(results))
}
