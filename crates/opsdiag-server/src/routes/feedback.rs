use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use opsdiag_core::feedback::{self, FeedbackKind, NewFeedback};
use opsdiag_core::types::Product;
use opsdiag_core::OpsdiagError;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

/// GET /api/feedback: all feedback, oldest first.
pub async fn list_feedback(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let entries = feedback::list(&root)?;
        Ok::<_, OpsdiagError>(serde_json::to_value(&entries)?)
    })
    .await
    .map_err(AppError::join)??;
    Ok(Json(result))
}

/// GET /api/feedback/{id}
pub async fn get_feedback(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let entry = feedback::get(&root, &id)?;
        Ok::<_, OpsdiagError>(serde_json::to_value(&entry)?)
    })
    .await
    .map_err(AppError::join)??;
    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// Enum fields arrive as strings so bad values surface as 400s from the
/// core parsers rather than extractor rejections.
#[derive(Debug, Deserialize)]
pub struct SubmitBody {
    pub client: String,
    pub product: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub submitter: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub details: String,
}

fn default_kind() -> String {
    "general".to_string()
}

/// POST /api/feedback: record a new entry.
pub async fn submit_feedback(
    State(app): State<AppState>,
    Json(body): Json<SubmitBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let new = NewFeedback {
            client: body.client,
            product: body.product.parse::<Product>()?,
            kind: body.kind.parse::<FeedbackKind>()?,
            submitter: body.submitter,
            summary: body.summary,
            details: body.details,
            date: None,
        };
        let entry = feedback::add(&root, new)?;
        Ok::<_, OpsdiagError>(serde_json::to_value(&entry)?)
    })
    .await
    .map_err(AppError::join)??;
    Ok((StatusCode::CREATED, Json(result)))
}
