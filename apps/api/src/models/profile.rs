//! Wire types for the three stage requests.
//!
//! All of these are transient: built from a request body, discarded once the
//! response is sent and the artifact file is written. The caller-supplied
//! `timestamp` is an opaque identity key for the persisted artifacts; it is
//! never parsed as time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustedSource {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub tags: Vec<String>,
    pub source: String,
}

/// Content the user has read, wants, or passed on. The same item may legally
/// appear in more than one list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCalibration {
    pub read: Vec<ContentItem>,
    pub want: Vec<ContentItem>,
    #[serde(default)]
    pub pass_on: Vec<ContentItem>,
}

/// Full profile submitted to the persona stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub category: String,
    pub role: String,
    pub challenges: Vec<Challenge>,
    pub trusted_sources: Vec<TrustedSource>,
    pub content_calibration: ContentCalibration,
    pub timestamp: String,
}

/// Input to the scoring-dimensions stage. The persona text is opaque; no
/// schema is imposed on what stage 1 produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaRequest {
    pub persona: String,
    pub timestamp: String,
}

/// Input to the ranking stage. The caller re-supplies both upstream outputs;
/// stages never read each other's artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPoolRequest {
    pub persona: String,
    pub scoring_dimensions: String,
    pub timestamp: String,
}
