//! Axum route handlers for the three pipeline stages.
//!
//! Each stage is one stateless transaction: validate input → build prompt →
//! call the gateway → (ranking only) extract → persist artifact → respond.
//! Stages share no in-process state; cross-stage continuity is the caller's
//! job, so stage 2 receives the persona text in its request body rather than
//! reading stage 1's artifact.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::load_catalog;
use crate::errors::AppError;
use crate::llm_client::{PERSONA_PARAMS, RANKING_PARAMS, SCORING_PARAMS};
use crate::models::profile::{ContentPoolRequest, PersonaRequest, UserProfile};
use crate::pipeline::candidates::project_candidates;
use crate::pipeline::extract::{parse_ranking_reply, RankingOutcome};
use crate::pipeline::prompts::{build_persona_prompt, build_ranking_prompt, build_scoring_prompt};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PersonaData {
    pub role: String,
    pub area: String,
    pub persona: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct PersonaResponse {
    pub status: String,
    pub message: String,
    pub profile_saved: String,
    pub persona_saved: String,
    pub persona_data: PersonaData,
}

#[derive(Debug, Serialize)]
pub struct ScoringData {
    pub persona: String,
    pub scoring_dimensions: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct ScoringResponse {
    pub status: String,
    pub message: String,
    pub scoring_saved: String,
    pub scoring_data: ScoringData,
}

#[derive(Debug, Serialize)]
pub struct RankingData {
    pub persona: String,
    pub scoring_dimensions: String,
    pub ranking_results: RankingOutcome,
    pub candidates_count: usize,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub status: String,
    pub message: String,
    pub ranking_saved: String,
    pub ranking_data: RankingData,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-persona
///
/// Stage 1: persists the incoming profile, asks the model for a persona,
/// persists the result. A gateway failure aborts the stage; there is no
/// locally synthesized fallback persona.
pub async fn handle_generate_persona(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<PersonaResponse>, AppError> {
    if profile.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    if profile.timestamp.trim().is_empty() {
        return Err(AppError::Validation("timestamp cannot be empty".to_string()));
    }

    info!(
        "generate-persona: role={}, category={}",
        profile.role, profile.category
    );

    let profile_saved = state
        .artifacts
        .write("user-profile", &profile.timestamp, &profile)?;

    let prompt = build_persona_prompt(&profile);
    debug!("persona prompt:\n{prompt}");

    let persona = state.gateway.generate(&prompt, PERSONA_PARAMS).await?;
    info!("persona generated: {} characters", persona.len());
    debug!("persona reply:\n{persona}");

    let persona_data = PersonaData {
        role: profile.role.clone(),
        area: profile.category.clone(),
        persona,
        generated_at: profile.timestamp.clone(),
    };

    let persona_saved = state
        .artifacts
        .write("persona", &profile.timestamp, &persona_data)?;

    Ok(Json(PersonaResponse {
        status: "success".to_string(),
        message: "Persona generated successfully".to_string(),
        profile_saved,
        persona_saved,
        persona_data,
    }))
}

/// POST /api/generate-scoring-dimensions
///
/// Stage 2: turns a persona into a weighted scoring framework. The model's
/// reply is kept as free text; downstream consumers parse the dimension
/// names out of it, not this service.
pub async fn handle_generate_scoring(
    State(state): State<AppState>,
    Json(request): Json<PersonaRequest>,
) -> Result<Json<ScoringResponse>, AppError> {
    if request.persona.trim().is_empty() {
        return Err(AppError::Validation("persona cannot be empty".to_string()));
    }
    if request.timestamp.trim().is_empty() {
        return Err(AppError::Validation("timestamp cannot be empty".to_string()));
    }

    info!(
        "generate-scoring-dimensions: persona is {} characters",
        request.persona.len()
    );

    let prompt = build_scoring_prompt(&request.persona);
    debug!("scoring prompt:\n{prompt}");

    let scoring_dimensions = state.gateway.generate(&prompt, SCORING_PARAMS).await?;
    info!(
        "scoring dimensions generated: {} characters",
        scoring_dimensions.len()
    );

    let scoring_data = ScoringData {
        persona: request.persona,
        scoring_dimensions,
        generated_at: request.timestamp.clone(),
    };

    let scoring_saved = state
        .artifacts
        .write("scoring-dimensions", &request.timestamp, &scoring_data)?;

    Ok(Json(ScoringResponse {
        status: "success".to_string(),
        message: "Scoring dimensions generated successfully".to_string(),
        scoring_saved,
        scoring_data,
    }))
}

/// POST /api/content-pool-ranking
///
/// Stage 3: projects the catalog into candidates, asks the model to score
/// them against the supplied framework, and extracts the JSON ranking from
/// the reply. An unparseable reply is not a failure; the raw text is
/// embedded in `ranking_results` for the caller to inspect.
pub async fn handle_content_pool_ranking(
    State(state): State<AppState>,
    Json(request): Json<ContentPoolRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    if request.scoring_dimensions.trim().is_empty() {
        return Err(AppError::Validation(
            "scoring_dimensions cannot be empty".to_string(),
        ));
    }
    if request.timestamp.trim().is_empty() {
        return Err(AppError::Validation("timestamp cannot be empty".to_string()));
    }

    info!(
        "content-pool-ranking: persona {} characters, dimensions {} characters",
        request.persona.len(),
        request.scoring_dimensions.len()
    );

    let catalog = load_catalog(&state.config.catalog_dir).await?;
    let candidates = project_candidates(&catalog);

    let prompt = build_ranking_prompt(&candidates, &request.scoring_dimensions);
    debug!("ranking prompt:\n{prompt}");

    let reply = state.gateway.generate(&prompt, RANKING_PARAMS).await?;
    info!("ranking reply: {} characters", reply.len());

    let ranking_results = parse_ranking_reply(&reply, candidates.len());

    let ranking_data = RankingData {
        persona: request.persona,
        scoring_dimensions: request.scoring_dimensions,
        ranking_results,
        candidates_count: candidates.len(),
        generated_at: request.timestamp.clone(),
    };

    let ranking_saved = state
        .artifacts
        .write("content-ranking", &request.timestamp, &ranking_data)?;

    Ok(Json(RankingResponse {
        status: "success".to_string(),
        message: "Content pool ranking completed successfully".to_string(),
        ranking_saved,
        ranking_data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactStore;
    use crate::config::Config;
    use crate::llm_client::{LlmError, ModelGateway, StageParams};
    use crate::models::profile::ContentCalibration;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Arc;

    /// Gateway stub returning a canned reply; `fail` simulates an upstream
    /// outage.
    struct StubGateway {
        reply: String,
        fail: bool,
    }

    #[async_trait]
    impl ModelGateway for StubGateway {
        async fn generate(
            &self,
            _prompt: &str,
            _params: StageParams,
        ) -> Result<String, LlmError> {
            if self.fail {
                return Err(LlmError::Api {
                    status: 529,
                    message: "overloaded".to_string(),
                });
            }
            Ok(self.reply.clone())
        }
    }

    fn test_state(dir: &Path, reply: &str, fail: bool) -> AppState {
        AppState {
            gateway: Arc::new(StubGateway {
                reply: reply.to_string(),
                fail,
            }),
            artifacts: ArtifactStore::new(dir.to_path_buf()),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                anthropic_model: "test-model".to_string(),
                catalog_dir: dir.to_path_buf(),
                artifact_dir: dir.to_path_buf(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    fn write_catalog(dir: &Path) {
        let catalog = json!([
            {"videoId": "a1", "title": "First", "author": "Ann", "description": "d1"},
            {"videoId": "b2", "title": "Second", "author": "Bob", "description": "d2"}
        ]);
        std::fs::write(
            dir.join("top10_metadata.json"),
            serde_json::to_string(&catalog).unwrap(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_scoring_stage_returns_stub_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let stub_reply = "1. **Strategic Decision Architecture** (60%) - *Does this sharpen a decision?*\n\n2. **Market Signal Interpretation** (40%) - *Does this separate signal from noise?*";
        let state = test_state(dir.path(), stub_reply, false);

        let request = PersonaRequest {
            persona: "A hands-on CTO scaling an AI product.".to_string(),
            timestamp: "2025-01-01T00-00-00".to_string(),
        };

        let Json(response) = handle_generate_scoring(State(state), Json(request))
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.scoring_data.scoring_dimensions, stub_reply);
        assert_eq!(response.scoring_data.generated_at, "2025-01-01T00-00-00");
        assert!(dir.path().join(&response.scoring_saved).exists());
    }

    #[tokio::test]
    async fn test_scoring_stage_rejects_empty_persona() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), "unused", false);

        let request = PersonaRequest {
            persona: "   ".to_string(),
            timestamp: "2025-01-01T00-00-00".to_string(),
        };

        let result = handle_generate_scoring(State(state), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_persona_stage_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), "**Executive Summary:** a persona.", false);

        let profile = UserProfile {
            category: "AI Products".to_string(),
            role: "CTO".to_string(),
            challenges: vec![],
            trusted_sources: vec![],
            content_calibration: ContentCalibration {
                read: vec![],
                want: vec![],
                pass_on: vec![],
            },
            timestamp: "2025-08-25T10:30:00.123".to_string(),
        };

        let Json(response) = handle_generate_persona(State(state), Json(profile))
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(
            response.profile_saved,
            "user-profile-2025-08-25T10-30-00-123.json"
        );
        assert_eq!(response.persona_saved, "persona-2025-08-25T10-30-00-123.json");
        assert!(dir.path().join(&response.profile_saved).exists());
        assert!(dir.path().join(&response.persona_saved).exists());
        assert_eq!(response.persona_data.area, "AI Products");
    }

    #[tokio::test]
    async fn test_persona_stage_propagates_gateway_failure() {
        // Hard-fail policy: no fallback persona on upstream errors.
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), "", true);

        let profile = UserProfile {
            category: "AI Products".to_string(),
            role: "CTO".to_string(),
            challenges: vec![],
            trusted_sources: vec![],
            content_calibration: ContentCalibration {
                read: vec![],
                want: vec![],
                pass_on: vec![],
            },
            timestamp: "2025-01-01T00:00:00".to_string(),
        };

        let result = handle_generate_persona(State(state), Json(profile)).await;
        assert!(matches!(result, Err(AppError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_ranking_stage_extracts_fenced_reply() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path());

        let reply = "Here you go:\n```json\n[{\"videoId\": \"a1\", \"final_weighted_score\": 4.5, \"scores\": {}}]\n```";
        let state = test_state(dir.path(), reply, false);

        let request = ContentPoolRequest {
            persona: "persona text".to_string(),
            scoring_dimensions: "1. **Signal** (100%)".to_string(),
            timestamp: "2025-01-02T00:00:00".to_string(),
        };

        let Json(response) = handle_content_pool_ranking(State(state), Json(request))
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.ranking_data.candidates_count, 2);
        match &response.ranking_data.ranking_results {
            RankingOutcome::Ranked { ranked_content, .. } => {
                assert_eq!(ranked_content[0]["videoId"], "a1");
            }
            RankingOutcome::Failed { .. } => panic!("expected extracted ranking"),
        }
        assert!(dir.path().join(&response.ranking_saved).exists());
    }

    #[tokio::test]
    async fn test_ranking_stage_embeds_raw_reply_on_bad_json() {
        // Extraction failure is data: the stage still succeeds and the raw
        // reply is returned for inspection.
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path());

        let reply = "I am unable to rank these items.";
        let state = test_state(dir.path(), reply, false);

        let request = ContentPoolRequest {
            persona: "persona text".to_string(),
            scoring_dimensions: "1. **Signal** (100%)".to_string(),
            timestamp: "2025-01-03T00:00:00".to_string(),
        };

        let Json(response) = handle_content_pool_ranking(State(state), Json(request))
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        match &response.ranking_data.ranking_results {
            RankingOutcome::Failed { raw_response, .. } => {
                assert_eq!(raw_response, reply);
            }
            RankingOutcome::Ranked { .. } => panic!("expected extraction failure"),
        }
    }

    #[tokio::test]
    async fn test_ranking_stage_404s_without_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path(), "[]", false);

        let request = ContentPoolRequest {
            persona: "persona text".to_string(),
            scoring_dimensions: "1. **Signal** (100%)".to_string(),
            timestamp: "2025-01-04T00:00:00".to_string(),
        };

        let result = handle_content_pool_ranking(State(state), Json(request)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
