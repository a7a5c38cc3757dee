use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::chart::ChartDocument;
use crate::store::{self, StoreError};
use crate::web::error::ApiError;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    /// Sent by the chart page this frontend was adapted from; read but unused.
    pub symbol: Option<String>,
}

/// `GET /data`: re-reads the profile file and returns the chart document.
/// No caching; every request sees whatever is on disk right now.
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataQuery>,
) -> Result<Json<ChartDocument>, ApiError> {
    let _ = query.symbol;
    debug!(path = %state.config.profile_path, "reading profile file");
    let bytes = tokio::fs::read(&state.config.profile_path)
        .await
        .map_err(StoreError::from)?;
    let table = store::decode_profile(bytes.as_slice())?;
    Ok(Json(ChartDocument::cpu_over_time(table)))
}
