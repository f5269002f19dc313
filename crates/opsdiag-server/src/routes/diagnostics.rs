use axum::extract::{Query, State};
use axum::Json;
use opsdiag_core::registry;
use opsdiag_core::OpsdiagError;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DiagnosticsQuery {
    pub client: Option<String>,
}

/// GET /api/diagnostics?client=: registered diagnostic instances.
pub async fn list_diagnostics(
    State(app): State<AppState>,
    Query(q): Query<DiagnosticsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let entries = match q.client.as_deref() {
            Some(client) => registry::find(&root, client)?,
            None => registry::list(&root)?,
        };
        Ok::<_, OpsdiagError>(serde_json::to_value(&entries)?)
    })
    .await
    .map_err(AppError::join)??;
    Ok(Json(result))
}
