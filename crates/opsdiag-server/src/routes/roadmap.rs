use axum::extract::{Query, State};
use axum::Json;
use opsdiag_core::roadmap::{assemble, RoadmapSummary};
use opsdiag_core::rollup::rollup_for;
use opsdiag_core::types::RoleLever;
use opsdiag_core::OpsdiagError;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Roadmap
// ---------------------------------------------------------------------------

/// GET /api/roadmap: year plans for every horizon year, plus summary.
pub async fn get_roadmap(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let (config, loaded) = app.load()?;
        let horizon = config.planning_horizon;
        let roadmap = assemble(&loaded.document.roadmap.items(), &horizon);
        let summary = RoadmapSummary::from_roadmap(&roadmap, &horizon);
        Ok::<_, OpsdiagError>(serde_json::json!({
            "horizon": horizon,
            "years": roadmap.years,
            "ai_use_cases": roadmap.ai_use_cases,
            "summary": summary,
        }))
    })
    .await
    .map_err(AppError::join)??;
    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// Rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RollupQuery {
    /// Defaults to the first horizon year.
    pub year: Option<u16>,
    /// `productivity` (default) or `offshoring`.
    pub lever: Option<String>,
}

/// GET /api/roadmap/rollup?year=&lever=: per-function totals.
pub async fn get_rollup(
    State(app): State<AppState>,
    Query(q): Query<RollupQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let lever: RoleLever = q.lever.as_deref().unwrap_or("productivity").parse()?;
        let (config, loaded) = app.load()?;
        let year = q.year.unwrap_or(config.planning_horizon.first_year());
        let table = rollup_for(
            &loaded.document.roadmap.role_items(),
            lever,
            year,
            &config.catalog(),
        );
        Ok::<_, OpsdiagError>(serde_json::json!({
            "year": year,
            "lever": lever,
            "entries": table.entries,
            "grand_total": table.grand_total,
        }))
    })
    .await
    .map_err(AppError::join)??;
    Ok(Json(result))
}
