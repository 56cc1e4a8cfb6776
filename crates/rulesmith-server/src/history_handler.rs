use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use rulesmith::{DeleteOutcome, RecordId, RuleRecord};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DeleteResponse {
    /// The id that was removed.
    pub deleted: RecordId,
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
    pub removed: usize,
}

fn record_not_found(id: &str) -> ApiError {
    ApiError::NotFound {
        code: "RECORD_NOT_FOUND",
        message: format!("no record with id {id}"),
    }
}

/// `GET /api/history` - the full collection, oldest first.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RuleRecord>>, ApiError> {
    let records = state.history().list_all().await?;
    Ok(Json(records))
}

/// `GET /api/history/{id}` - one record by exact id match.
///
/// A path segment that does not parse as a UUID cannot name a stored
/// record, so it gets the same not-found answer as an unknown id.
pub async fn get_history_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RuleRecord>, ApiError> {
    let Ok(record_id) = RecordId::parse(&id) else {
        return Err(record_not_found(&id));
    };
    match state.history().get_by_id(&record_id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(record_not_found(&id)),
    }
}

/// `DELETE /api/history/{id}` - remove one record by id.
pub async fn delete_history_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Ok(record_id) = RecordId::parse(&id) else {
        return Err(record_not_found(&id));
    };
    match state.history().delete_by_id(&record_id).await? {
        DeleteOutcome::Deleted(deleted) => Ok(Json(DeleteResponse { deleted })),
        DeleteOutcome::NotFound => Err(record_not_found(&id)),
    }
}

/// `POST /api/history/clear` - empty the collection.
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, ApiError> {
    let removed = state.history().clear_all().await?;
    Ok(Json(ClearResponse {
        cleared: true,
        removed,
    }))
}
