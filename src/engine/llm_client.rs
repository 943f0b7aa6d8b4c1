use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AppConfig;
use crate::engine::prompt_builder::PromptBuilder;
use crate::model::error::{GameError, GameResult};
use crate::model::llm_decode::decode_reply;
use crate::model::reply::ClassifiedReply;

/// Decides whether an utterance is a guess or a question about `secret_item`.
pub trait Classifier {
    fn classify(&self, secret_item: &str, utterance: &str) -> GameResult<ClassifiedReply>;

    /// Called whenever the player saves or clears the API key.
    fn set_api_key(&mut self, _api_key: Option<String>) {}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentRequest {
    pub fn for_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: PromptBuilder::response_schema(),
            },
        }
    }
}

impl GenerateContentResponse {
    /// A 2xx body that is not the expected envelope counts as malformed
    /// model output, not as a transport failure.
    pub fn from_body(body: &str) -> GameResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| GameError::Parse(format!("unexpected response body ({e}): {body}")))
    }

    /// Concatenated text of the first candidate.
    pub fn text(&self) -> GameResult<String> {
        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GameError::Parse("model returned no text".into()));
        }
        Ok(text)
    }
}

/// Classifier backed by the Gemini `generateContent` endpoint.
pub struct GeminiClassifier {
    client: Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClassifier {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.fallback_api_key.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn generate(&self, prompt: String) -> GameResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GameError::MissingCredential);
        };

        let req = GenerateContentRequest::for_prompt(prompt);

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&req)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GameError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text()?;
        GenerateContentResponse::from_body(&body)?.text()
    }
}

impl Classifier for GeminiClassifier {
    fn classify(&self, secret_item: &str, utterance: &str) -> GameResult<ClassifiedReply> {
        let prompt = PromptBuilder::build(secret_item, utterance);
        log::debug!("classification prompt:\n{prompt}");

        let raw = self.generate(prompt)?;
        log::debug!("raw model output: {raw}");

        decode_reply(&raw)
    }

    fn set_api_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_wire_field_names() {
        let req = GenerateContentRequest::for_prompt("hello".into());
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            json["generationConfig"]["responseSchema"]["required"][0],
            "type"
        );
    }

    #[test]
    fn response_text_joins_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"type\":"},{"text":"\"question_answer\",\"response\":\"No\"}"}]}}]}"#,
        )
        .unwrap();

        let reply = decode_reply(&resp.text().unwrap()).unwrap();
        assert_eq!(reply.response(), "No");
    }

    #[test]
    fn empty_candidates_is_a_parse_error() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(resp.text(), Err(GameError::Parse(_))));

        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(resp.text(), Err(GameError::Parse(_))));
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        let result = GenerateContentResponse::from_body("<html>Service Unavailable</html>");
        assert!(matches!(result, Err(GameError::Parse(_))));

        let result = GenerateContentResponse::from_body(r#"{"candidates": "oops"}"#);
        assert!(matches!(result, Err(GameError::Parse(_))));
    }

    #[test]
    fn envelope_body_decodes() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"type\":\"guess_incorrect\",\"response\":\"No\"}"}]}}]}"#;
        let text = GenerateContentResponse::from_body(body).unwrap().text().unwrap();
        assert_eq!(decode_reply(&text).unwrap().tag(), "guess_incorrect");
    }

    #[test]
    fn refuses_to_call_without_key() {
        let mut classifier = GeminiClassifier::new(&AppConfig::default());
        assert!(!classifier.has_api_key());

        let result = classifier.classify("Banana", "Is it a fruit?");
        assert!(matches!(result, Err(GameError::MissingCredential)));

        classifier.set_api_key(Some("key".into()));
        assert!(classifier.has_api_key());
    }

    #[test]
    fn endpoint_names_the_model() {
        let config = AppConfig {
            api_base: "http://localhost:9999/v1beta/".into(),
            ..AppConfig::default()
        };
        let classifier = GeminiClassifier::new(&config);

        assert_eq!(
            classifier.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
