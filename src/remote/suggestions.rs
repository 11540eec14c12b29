// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption suggestions from a Hugging Face text generation endpoint.

use super::{success_body, FetchError};
use rand::seq::IndexedRandom;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "HF_API_TOKEN";

pub const UNAVAILABLE_NOTICE: &str =
    "AI suggestions temporarily unavailable. Using fallback options!";

const SHOWN: usize = 4;
const MAX_PAIRS: usize = 3;

const PROMPTS: [&str; 5] = [
    "Generate funny meme captions about work and Monday morning struggles",
    "Create humorous top and bottom text for memes about programming and coding",
    "Write witty meme captions about everyday life expectations vs reality",
    "Generate relatable meme text about social media and internet culture",
    "Create funny captions for memes about procrastination and productivity",
];

const AI_FAILED: [(&str, &str); 3] = [
    ("When AI fails", "But you still need memes"),
    ("Expectation: AI magic", "Reality: Fallback text"),
    ("Me: Uses AI for memes", "AI: Returns gibberish"),
];

const EXTRAS: [(&str, &str); 3] = [
    ("When you realize", "It's already Monday"),
    ("Me trying to adult", "vs Reality"),
    ("My brain at 3 AM", "Let's overthink everything"),
];

const OFFLINE: [(&str, &str); 4] = [
    ("When AI is down", "But memes must go on"),
    ("API Error 404", "Humor not found"),
    ("Me: Tries AI memes", "Internet: Nope"),
    ("Expectation: AI magic", "Reality: Manual memes"),
];

/// How a suggestion came about, shown under it in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    Ai,
    Suggested,
    Offline,
}

impl SuggestionSource {
    pub fn label(self) -> &'static str {
        match self {
            SuggestionSource::Ai => "🤖 AI Generated",
            SuggestionSource::Suggested => "💡 Suggested",
            SuggestionSource::Offline => "📱 Offline Mode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub top: String,
    pub bottom: String,
    pub source: SuggestionSource,
}

impl Suggestion {
    fn from_pair((top, bottom): (&str, &str), source: SuggestionSource) -> Self {
        Self {
            top: top.to_string(),
            bottom: bottom.to_string(),
            source,
        }
    }
}

/// Result of one suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionBatch {
    pub suggestions: Vec<Suggestion>,
    /// Alert to show when the request fell back to offline content.
    pub notice: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct Parameters {
    max_length: u32,
    temperature: f32,
    do_sample: bool,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

fn random_prompt() -> &'static str {
    PROMPTS.choose(&mut rand::rng()).copied().unwrap_or(PROMPTS[0])
}

/// Split generated text into sentences and pair consecutive ones as
/// top/bottom captions, at most three pairs.
pub fn parse_generated(text: &str) -> Vec<(String, String)> {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .filter(|piece| piece.trim().chars().count() > 3)
        .collect();

    let pairs = sentences.len().saturating_sub(1).min(MAX_PAIRS);
    (0..pairs)
        .map(|i| {
            (
                sentences[i].trim().to_string(),
                sentences[i + 1].trim().to_string(),
            )
        })
        .collect()
}

/// Pull `[0].generated_text` out of a response body, if present.
fn generated_text(body: &Value) -> Option<&str> {
    body.get(0)?.get("generated_text")?.as_str()
}

/// Build the list shown after a successful response.
pub fn suggestions_from_response(body: &Value) -> Vec<Suggestion> {
    let generated = generated_text(body)
        .map(parse_generated)
        .unwrap_or_default();

    let mut pairs: Vec<(String, String)> = if generated.is_empty() {
        AI_FAILED
            .iter()
            .map(|(top, bottom)| (top.to_string(), bottom.to_string()))
            .collect()
    } else {
        generated
    };
    pairs.extend(
        EXTRAS
            .iter()
            .map(|(top, bottom)| (top.to_string(), bottom.to_string())),
    );

    pairs
        .into_iter()
        .take(SHOWN)
        .enumerate()
        .map(|(index, (top, bottom))| Suggestion {
            top,
            bottom,
            source: if index == 0 {
                SuggestionSource::Ai
            } else {
                SuggestionSource::Suggested
            },
        })
        .collect()
}

pub fn offline_suggestions() -> Vec<Suggestion> {
    OFFLINE
        .iter()
        .map(|&pair| Suggestion::from_pair(pair, SuggestionSource::Offline))
        .collect()
}

async fn request_generation(
    client: &reqwest::Client,
    endpoint: &str,
    token: Option<&str>,
) -> Result<Value, FetchError> {
    let request = GenerationRequest {
        inputs: random_prompt(),
        parameters: Parameters {
            max_length: 100,
            temperature: 0.8,
            do_sample: true,
            top_p: 0.9,
        },
    };

    let mut builder = client.post(endpoint).json(&request);
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        builder = builder.bearer_auth(token);
    }
    let body = success_body(builder.send().await?).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Ask the endpoint for captions. Never fails; any error yields the
/// offline list plus an alert notice.
pub async fn fetch_suggestions(
    client: &reqwest::Client,
    endpoint: &str,
    token: Option<&str>,
) -> SuggestionBatch {
    match request_generation(client, endpoint, token).await {
        Ok(body) => SuggestionBatch {
            suggestions: suggestions_from_response(&body),
            notice: None,
        },
        Err(e) => {
            log::error!("AI generation failed: {}", e);
            SuggestionBatch {
                suggestions: offline_suggestions(),
                notice: Some(UNAVAILABLE_NOTICE),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::test_server::{client, serve_once};
    use serde_json::json;

    #[test]
    fn test_parse_pairs_consecutive_sentences() {
        let pairs = parse_generated("Monday again. Coffee is empty! Why? Boss is here. Deadline today");
        assert_eq!(
            pairs,
            vec![
                ("Monday again".to_string(), "Coffee is empty".to_string()),
                ("Coffee is empty".to_string(), "Boss is here".to_string()),
                ("Boss is here".to_string(), "Deadline today".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_drops_short_pieces_and_single_sentence() {
        // "Why" is only three characters
        assert!(parse_generated("Why? Only one sentence here.").is_empty());
        assert!(parse_generated("").is_empty());
        assert_eq!(parse_generated("First line... Second line!!").len(), 1);
    }

    #[test]
    fn test_response_with_text_labels_first_as_ai() {
        let body = json!([{ "generated_text": "Code compiles. Tests fail." }]);
        let suggestions = suggestions_from_response(&body);
        assert_eq!(suggestions.len(), 4);
        assert_eq!(suggestions[0].top, "Code compiles");
        assert_eq!(suggestions[0].bottom, "Tests fail");
        assert_eq!(suggestions[0].source, SuggestionSource::Ai);
        assert_eq!(suggestions[1].top, "When you realize");
        assert!(suggestions[1..]
            .iter()
            .all(|s| s.source == SuggestionSource::Suggested));
    }

    #[test]
    fn test_response_without_text_uses_ai_failed_set() {
        let suggestions = suggestions_from_response(&json!({ "error": "loading" }));
        let tops: Vec<&str> = suggestions.iter().map(|s| s.top.as_str()).collect();
        assert_eq!(
            tops,
            vec![
                "When AI fails",
                "Expectation: AI magic",
                "Me: Uses AI for memes",
                "When you realize"
            ]
        );
    }

    #[tokio::test]
    async fn test_success_response() {
        let endpoint = serve_once("200 OK", r#"[{"generated_text":"Bugs everywhere. Ship it anyway."}]"#).await;
        let batch = fetch_suggestions(&client(), &endpoint, Some("token")).await;
        assert_eq!(batch.notice, None);
        assert_eq!(batch.suggestions[0].bottom, "Ship it anyway");
    }

    #[tokio::test]
    async fn test_http_error_falls_back_offline() {
        let endpoint = serve_once("401 Unauthorized", r#"{"error":"bad token"}"#).await;
        let batch = fetch_suggestions(&client(), &endpoint, None).await;
        assert_eq!(batch.notice, Some(UNAVAILABLE_NOTICE));
        assert_eq!(batch.suggestions, offline_suggestions());
    }

    #[tokio::test]
    async fn test_malformed_and_unreachable_fall_back_offline() {
        let endpoint = serve_once("200 OK", "not json").await;
        let batch = fetch_suggestions(&client(), &endpoint, None).await;
        assert_eq!(batch.notice, Some(UNAVAILABLE_NOTICE));

        let batch = fetch_suggestions(&client(), "http://127.0.0.1:9/models", None).await;
        assert_eq!(batch.suggestions.len(), 4);
        assert!(batch
            .suggestions
            .iter()
            .all(|s| s.source == SuggestionSource::Offline));
    }
}
