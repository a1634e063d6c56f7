//! Persistence sink for stage artifacts.
//!
//! Each stage invocation writes one indented-JSON file named from a stage
//! prefix and the caller-supplied timestamp. There is no locking and no
//! collision detection: two writers bearing the same timestamp overwrite
//! each other, last writer wins. Artifacts accumulate indefinitely.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;

/// Writes stage artifacts into a single output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writes `payload` as indented JSON to `{prefix}-{token}.json`, where
    /// `token` is the sanitized timestamp. Returns the file name.
    pub fn write<T: Serialize>(
        &self,
        prefix: &str,
        timestamp: &str,
        payload: &T,
    ) -> Result<String, AppError> {
        let filename = format!("{prefix}-{}.json", sanitize_timestamp(timestamp));
        let body = serde_json::to_string_pretty(payload).map_err(anyhow::Error::from)?;
        std::fs::write(self.dir.join(&filename), body)?;
        info!("Artifact written: {filename}");
        Ok(filename)
    }
}

/// Replaces the timestamp characters that are unsafe in file names
/// (`:` and `.`) with `-`.
fn sanitize_timestamp(timestamp: &str) -> String {
    timestamp.replace([':', '.'], "-")
}
