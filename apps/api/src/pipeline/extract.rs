//! Best-effort extraction of JSON embedded in a free-text model reply.
//!
//! The ranking stage asks for a fenced JSON array, but replies routinely
//! arrive wrapped in prose. Extraction failure is data, not a fault: the raw
//! reply rides back to the caller inside the response body instead of
//! becoming an HTTP error.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Outcome of parsing a ranking reply. Serializes untagged so the two shapes
/// match the artifact format: `{ranked_content, total_items,
/// processing_summary}` on success, `{error, raw_response, total_items}` on
/// extraction failure.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RankingOutcome {
    Ranked {
        ranked_content: Value,
        total_items: usize,
        processing_summary: String,
    },
    Failed {
        error: String,
        raw_response: String,
        total_items: usize,
    },
}

/// Parses the model's ranking reply, tolerating three layouts in priority
/// order: a ```json fence, a bare outer `[...]` array, or the whole text.
pub fn parse_ranking_reply(reply: &str, total_items: usize) -> RankingOutcome {
    let candidate = extract_json_candidate(reply);

    match serde_json::from_str::<Value>(candidate) {
        Ok(ranked_content) => RankingOutcome::Ranked {
            ranked_content,
            total_items,
            processing_summary: format!("Successfully ranked {total_items} content items"),
        },
        Err(e) => {
            warn!("Failed to parse ranking reply as JSON: {e}");
            RankingOutcome::Failed {
                error: "Failed to parse ranking results".to_string(),
                raw_response: reply.to_string(),
                total_items,
            }
        }
    }
}

/// Locates the JSON substring inside `reply`.
///
/// The bare-array path takes the first `[` to the last `]` in the entire
/// text (no balanced-bracket scanning), so unrelated brackets in surrounding
/// prose can defeat it. The fence path is tried first, which keeps
/// well-formed replies off the heuristic.
fn extract_json_candidate(reply: &str) -> &str {
    if let Some(fence) = reply.find("```json") {
        let inner = &reply[fence + "```json".len()..];
        return match inner.find("```") {
            Some(end) => inner[..end].trim(),
            None => inner.trim(),
        };
    }

    if let Some(start) = reply.find('[') {
        if let Some(end) = reply.rfind(']') {
            if end > start {
                return &reply[start..=end];
            }
        }
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_json_round_trips() {
        let value = json!([
            {"videoId": "a1", "final_weighted_score": 4.62,
             "scores": {"Strategic Decision Architecture": {"score": 5, "reasoning": "strong"}}}
        ]);
        let reply = format!(
            "Here is the ranking you asked for:\n\n```json\n{}\n```\n\nLet me know if you need anything else.",
            serde_json::to_string_pretty(&value).unwrap()
        );

        match parse_ranking_reply(&reply, 1) {
            RankingOutcome::Ranked {
                ranked_content,
                total_items,
                processing_summary,
            } => {
                assert_eq!(ranked_content, value);
                assert_eq!(total_items, 1);
                assert_eq!(processing_summary, "Successfully ranked 1 content items");
            }
            RankingOutcome::Failed { .. } => panic!("expected successful extraction"),
        }
    }

    #[test]
    fn test_bare_array_without_fence() {
        let reply = r#"Sure! [{"videoId": "a1", "final_weighted_score": 3.5, "scores": {}}] Done."#;

        match parse_ranking_reply(reply, 1) {
            RankingOutcome::Ranked { ranked_content, .. } => {
                assert_eq!(ranked_content[0]["videoId"], "a1");
            }
            RankingOutcome::Failed { .. } => panic!("expected successful extraction"),
        }
    }

    #[test]
    fn test_prose_with_stray_brackets_fails_softly() {
        let reply = "I could not produce a ranking [sorry about that.";

        match parse_ranking_reply(reply, 3) {
            RankingOutcome::Failed {
                error,
                raw_response,
                total_items,
            } => {
                assert_eq!(error, "Failed to parse ranking results");
                assert_eq!(raw_response, reply);
                assert_eq!(total_items, 3);
            }
            RankingOutcome::Ranked { .. } => panic!("expected extraction failure"),
        }
    }

    #[test]
    fn test_whole_text_parsed_when_no_markers() {
        let reply = r#"{"note": "not an array, still valid JSON"}"#;

        match parse_ranking_reply(reply, 0) {
            RankingOutcome::Ranked { ranked_content, .. } => {
                assert_eq!(ranked_content["note"], "not an array, still valid JSON");
            }
            RankingOutcome::Failed { .. } => panic!("expected whole-text parse"),
        }
    }

    #[test]
    fn test_greedy_bracket_match_spans_outer_brackets() {
        // First-`[`/last-`]` is deliberate: trailing prose brackets extend the
        // match and the parse then fails softly rather than mis-parsing.
        let reply = r#"[{"videoId": "a1", "scores": {}}] as requested [see docs]"#;

        match parse_ranking_reply(reply, 1) {
            RankingOutcome::Failed { raw_response, .. } => {
                assert_eq!(raw_response, reply);
            }
            RankingOutcome::Ranked { .. } => panic!("greedy match should capture trailing prose"),
        }
    }

    #[test]
    fn test_fence_without_closing_marker() {
        let reply = "```json\n[1, 2, 3]";

        match parse_ranking_reply(reply, 3) {
            RankingOutcome::Ranked { ranked_content, .. } => {
                assert_eq!(ranked_content, json!([1, 2, 3]));
            }
            RankingOutcome::Failed { .. } => panic!("unterminated fence should still extract"),
        }
    }
}
