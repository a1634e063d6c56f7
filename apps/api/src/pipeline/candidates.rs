//! Candidate projection for the ranking stage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Longest description forwarded to the ranking prompt. Anything longer is
/// cut and marked with a trailing ellipsis so one verbose record cannot
/// dominate the token budget.
const MAX_DESCRIPTION_CHARS: usize = 500;

/// The slice of a catalog record the ranking prompt sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Projects raw catalog records into ranking candidates, preserving catalog
/// order. Missing fields project as empty strings; the catalog is externally
/// maintained and not under this service's control.
pub fn project_candidates(catalog: &[Value]) -> Vec<Candidate> {
    catalog
        .iter()
        .map(|record| Candidate {
            video_id: str_field(record, "videoId"),
            title: str_field(record, "title"),
            author: str_field(record, "author"),
            description: truncate_description(&str_field(record, "description")),
        })
        .collect()
}

fn str_field(record: &Value, key: &str) -> String {
    record[key].as_str().unwrap_or_default().to_string()
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        let head: String = description.chars().take(MAX_DESCRIPTION_CHARS).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
