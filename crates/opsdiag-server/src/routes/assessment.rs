use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use opsdiag_core::OpsdiagError;

use crate::error::AppError;
use crate::state::AppState;

pub const ORIGIN_HEADER: &str = "x-document-origin";

/// GET /api/assessment: the full assessment document. The header names
/// where it was loaded from.
pub async fn get_assessment(State(app): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let (origin, body) = tokio::task::spawn_blocking(move || {
        let (_, loaded) = app.load()?;
        for drift in loaded.document.benchmark_drift() {
            tracing::warn!(
                role = %drift.role,
                stored = drift.stored_pct,
                recomputed = drift.recomputed_pct,
                "stored pct_vs_benchmark disagrees with recomputation"
            );
        }
        let body = serde_json::to_value(&loaded.document)?;
        Ok::<_, OpsdiagError>((loaded.origin.to_string(), body))
    })
    .await
    .map_err(AppError::join)??;

    Ok(([(ORIGIN_HEADER, origin)], Json(body)))
}
