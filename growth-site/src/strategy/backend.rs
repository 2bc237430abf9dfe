use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use serde_json::{Value, json};

use constants::strategy::{
    CALL_TO_ACTION_DESCRIPTION, HEADLINE_DESCRIPTION, KEY_POINTS_DESCRIPTION, PROMPT_TEMPLATE,
    SYSTEM_INSTRUCTION,
};

use super::model::{StrategyError, StrategyResult};
use crate::config::SiteConfig;

#[cfg(not(target_arch = "wasm32"))]
pub type BackendFuture = Pin<Box<dyn Future<Output = Result<StrategyResult, StrategyError>> + Send>>;

// Browser fetch futures are not Send.
#[cfg(target_arch = "wasm32")]
pub type BackendFuture = Pin<Box<dyn Future<Output = Result<StrategyResult, StrategyError>>>>;

/// The external text-generation endpoint.
pub trait StrategyBackend: Send + Sync + 'static {
    fn generate(&self, niche: String) -> BackendFuture;
}

/// Generative Language API client (`models/{model}:generateContent`).
#[derive(Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl StrategyBackend for GeminiBackend {
    fn generate(&self, niche: String) -> BackendFuture {
        let client = self.client.clone();
        let url = self.request_url();
        let api_key = self.api_key.clone();

        Box::pin(async move {
            let api_key = api_key.ok_or(StrategyError::MissingApiKey)?;

            let response = client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&generate_content_request(&niche))
                .send()
                .await
                .map_err(|e| StrategyError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(StrategyError::Status(status.as_u16()));
            }

            let body = response
                .text()
                .await
                .map_err(|e| StrategyError::Transport(e.to_string()))?;
            parse_generate_content_response(&body)
        })
    }
}

/// Instruction text sent to the model with the niche embedded verbatim.
pub fn strategy_prompt(niche: &str) -> String {
    PROMPT_TEMPLATE.replace("{niche}", niche)
}

/// Request body: prompt, system instruction and a JSON response schema with all three fields required.
pub fn generate_content_request(niche: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": strategy_prompt(niche) }]
        }],
        "systemInstruction": {
            "parts": [{ "text": SYSTEM_INSTRUCTION }]
        },
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "headline": {
                        "type": "STRING",
                        "description": HEADLINE_DESCRIPTION
                    },
                    "keyPoints": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": KEY_POINTS_DESCRIPTION
                    },
                    "callToAction": {
                        "type": "STRING",
                        "description": CALL_TO_ACTION_DESCRIPTION
                    }
                },
                "required": ["headline", "keyPoints", "callToAction"]
            }
        }
    })
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    text: Option<String>,
}

/// Extract the first candidate's text and parse it as a strategy.
pub fn parse_generate_content_response(body: &str) -> Result<StrategyResult, StrategyError> {
    let envelope: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| StrategyError::Parse(e.to_string()))?;

    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(StrategyError::EmptyResponse);
    }
    StrategyResult::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 42 }
        })
        .to_string()
    }

    #[test]
    fn request_embeds_niche_and_requires_all_fields() {
        let body = generate_content_request("Venta de Café");

        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .expect("prompt text");
        assert!(prompt.contains("\"Venta de Café\""));
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["headline", "keyPoints", "callToAction"])
        );
        assert_eq!(
            config["responseSchema"]["properties"]["keyPoints"]["items"]["type"],
            "STRING"
        );
    }

    #[test]
    fn request_url_targets_generate_content() {
        let backend = GeminiBackend::from_config(&SiteConfig {
            endpoint: "http://localhost:9000/v1beta".into(),
            model: "gemini-test".into(),
            ..SiteConfig::default()
        });
        assert_eq!(
            backend.request_url(),
            "http://localhost:9000/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn parses_first_candidate_text() {
        let body = envelope(
            r#"{"headline":"Lujo sin esfuerzo","keyPoints":["Vistas","Ubicación","Confianza"],"callToAction":"Agenda tu visita"}"#,
        );
        let result = parse_generate_content_response(&body).expect("strategy");
        assert_eq!(result.headline, "Lujo sin esfuerzo");
        assert_eq!(result.key_points[1], "Ubicación");
    }

    #[test]
    fn missing_text_is_empty_response() {
        for body in [
            json!({}).to_string(),
            json!({ "candidates": [] }).to_string(),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }).to_string(),
            envelope("   "),
        ] {
            assert_eq!(
                parse_generate_content_response(&body),
                Err(StrategyError::EmptyResponse)
            );
        }
    }

    #[test]
    fn malformed_payloads_are_parse_errors() {
        for body in [
            "<html>".to_string(),
            envelope("Aquí tienes tu estrategia"),
            envelope(r#"{"headline":"h","keyPoints":["a"],"callToAction":"c"}"#),
        ] {
            assert!(matches!(
                parse_generate_content_response(&body),
                Err(StrategyError::Parse(_))
            ));
        }
    }

    #[test]
    fn missing_api_key_fails_before_any_request() {
        let backend = GeminiBackend::from_config(&SiteConfig::default());
        let outcome = bevy::tasks::block_on(backend.generate("café".into()));
        assert_eq!(outcome, Err(StrategyError::MissingApiKey));
    }
}
