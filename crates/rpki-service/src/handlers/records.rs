//! RPKI record query handlers.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use rpki_core::{RecordFilter, RpkiRecord};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /rpki`. All optional; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    /// Origin AS, decimal or `AS<n>`.
    #[serde(rename = "ASN")]
    pub asn: Option<String>,
    /// Exact prefix.
    pub prefix: Option<String>,
    /// Exact state.
    pub state: Option<String>,
}

impl RecordQuery {
    /// Convert into a store filter, dropping absent and empty parameters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` if `ASN` is not an integer.
    pub fn to_filter(&self) -> Result<RecordFilter, ApiError> {
        Ok(RecordFilter::from_params(
            self.asn.as_deref(),
            self.prefix.as_deref(),
            self.state.as_deref(),
        )?)
    }
}

/// List records matching the query filters.
///
/// Returns a JSON array, empty when nothing matches.
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Result<Json<Vec<RpkiRecord>>, ApiError> {
    let Query(query) = query?;
    let filter = query.to_filter()?;

    // Both backends block on I/O or a lock.
    let store = Arc::clone(&state.store);
    let lookup = filter.clone();
    let records = tokio::task::spawn_blocking(move || store.find(&lookup))
        .await
        .map_err(|e| ApiError::Internal(format!("query task failed: {e}")))??;

    tracing::debug!(
        asn = ?filter.asn,
        prefix = ?filter.prefix,
        state = ?filter.state,
        count = records.len(),
        "Fetched RPKI records"
    );

    Ok(Json(records))
}
