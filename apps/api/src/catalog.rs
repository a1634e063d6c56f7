//! Read-only lookups against the flat-file content catalog.
//!
//! The catalog directory is maintained by an external pipeline and holds
//! `top10_metadata.json` (a JSON array of video records) plus per-video
//! `{id}_article.md` and `{id}_keyInsights.json` files. This service never
//! writes to it.

use std::io::ErrorKind;
use std::path::Path;

use axum::extract::{Path as UrlPath, State};
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

const CATALOG_FILE: &str = "top10_metadata.json";

/// Loads and parses the catalog array. Missing file is a 404 (the catalog is
/// externally provisioned); malformed JSON is a distinct server error.
pub async fn load_catalog(dir: &Path) -> Result<Vec<Value>, AppError> {
    let path = dir.join(CATALOG_FILE);
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound("Video catalog not found".to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&raw).map_err(|e| AppError::CatalogFormat(e.to_string()))
}

/// GET /api/video/:video_id
///
/// Returns the catalog record whose `videoId` matches.
pub async fn handle_get_video(
    State(state): State<AppState>,
    UrlPath(video_id): UrlPath<String>,
) -> Result<Json<Value>, AppError> {
    let catalog = load_catalog(&state.config.catalog_dir).await?;

    let video = catalog
        .into_iter()
        .find(|item| item["videoId"] == video_id.as_str())
        .ok_or_else(|| AppError::NotFound(format!("Video {video_id} not found")))?;

    Ok(Json(json!({
        "status": "success",
        "video": video,
    })))
}

/// GET /api/content/:video_id/article
///
/// Plain-text article body for a video.
pub async fn handle_get_article(
    State(state): State<AppState>,
    UrlPath(video_id): UrlPath<String>,
) -> Result<String, AppError> {
    let path = state
        .config
        .catalog_dir
        .join(format!("{video_id}_article.md"));

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Article for {video_id} not found"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/content/:video_id/insights
///
/// Key-insights JSON object for a video.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    UrlPath(video_id): UrlPath<String>,
) -> Result<Json<Value>, AppError> {
    let path = state
        .config
        .catalog_dir
        .join(format!("{video_id}_keyInsights.json"));

    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "Key insights for {video_id} not found"
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let insights: Value =
        serde_json::from_str(&raw).map_err(|e| AppError::CatalogFormat(e.to_string()))?;

    Ok(Json(insights))
}
