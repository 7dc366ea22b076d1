/// Sync acknowledgement endpoints
///
/// The offline client pushes its pending records here in bulk. The
/// server acknowledges with counts; per-record reconciliation happens
/// through the regular CRUD endpoints, item by item, on the client side.
/// No merge or conflict resolution is attempted.
///
/// # Endpoints
///
/// - `POST /api/sync` - Acknowledge pending records with counts
/// - `GET  /api/sync/status` - Connectivity probe for the client
use crate::error::ApiResult;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Sync request: the client's pending records
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// Tasks queued while offline
    pub pending_tasks: Option<Vec<serde_json::Value>>,

    /// Columns queued while offline
    pub pending_columns: Option<Vec<serde_json::Value>>,
}

/// Counts of acknowledged records
#[derive(Debug, Serialize)]
pub struct SyncedCounts {
    /// Acknowledged tasks
    pub tasks: usize,

    /// Acknowledged columns
    pub columns: usize,
}

/// Sync response
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// Always true; failures surface as HTTP errors
    pub success: bool,

    /// Acknowledged counts
    pub synced: SyncedCounts,

    /// Server time (Unix milliseconds)
    pub timestamp: i64,
}

/// Sync status response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusResponse {
    /// The server answered, so it is online
    pub online: bool,

    /// Server time (Unix milliseconds)
    pub last_sync: i64,

    /// Server time (RFC 3339)
    pub server_time: String,
}

/// Acknowledge a batch of pending records
pub async fn sync(Json(req): Json<SyncRequest>) -> ApiResult<Json<SyncResponse>> {
    let tasks = req.pending_tasks.map(|t| t.len()).unwrap_or(0);
    let columns = req.pending_columns.map(|c| c.len()).unwrap_or(0);

    Ok(Json(SyncResponse {
        success: true,
        synced: SyncedCounts { tasks, columns },
        timestamp: Utc::now().timestamp_millis(),
    }))
}

/// Report sync connectivity
pub async fn sync_status() -> ApiResult<Json<SyncStatusResponse>> {
    let now = Utc::now();

    Ok(Json(SyncStatusResponse {
        online: true,
        last_sync: now.timestamp_millis(),
        server_time: now.to_rfc3339(),
    }))
}
