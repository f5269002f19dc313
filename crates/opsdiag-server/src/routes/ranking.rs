use axum::extract::{Query, State};
use axum::Json;
use opsdiag_core::ranking::rank_roadmap;
use opsdiag_core::OpsdiagError;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<usize>,
}

/// GET /api/ranking?limit=: top role-level items by FTE impact.
pub async fn get_ranking(
    State(app): State<AppState>,
    Query(q): Query<RankingQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    if q.limit == Some(0) {
        return Err(AppError::bad_request("limit must be at least 1"));
    }
    let result = tokio::task::spawn_blocking(move || {
        let (config, loaded) = app.load()?;
        let limit = q.limit.unwrap_or(config.ranking.top_n);
        let ranked = rank_roadmap(&loaded.document.roadmap, &config.planning_horizon, limit);
        Ok::<_, OpsdiagError>(serde_json::to_value(&ranked)?)
    })
    .await
    .map_err(AppError::join)??;
    Ok(Json(result))
}
