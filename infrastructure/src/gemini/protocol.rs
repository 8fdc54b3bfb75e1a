//! Gemini generateContent wire types
//!
//! Request and response bodies use the API's camelCase field names.
//! Only the fields this client sends or reads are modeled.

use macrolens_domain::GenerationRequest;
use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Blob {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f64,
    #[serde(rename = "topK")]
    pub top_k: u32,
    #[serde(rename = "topP")]
    pub top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

impl GenerateContentRequest {
    /// Build the wire request from a domain request.
    pub fn from_domain(request: &GenerationRequest) -> Self {
        let mut parts = vec![Part::Text {
            text: request.payload.text_part().to_string(),
        }];

        if let Some(inline) = request.payload.inline_part() {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type: inline.mime_type.clone(),
                    data: inline.data.clone(),
                },
            });
        }

        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: request.params.temperature,
                top_k: request.params.top_k,
                top_p: request.params.top_p,
                max_output_tokens: request.params.max_output_tokens,
            },
        }
    }
}

/// Response body from `generateContent`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: CandidateContent,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A response part; non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn first_candidate_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrolens_domain::{GenerationParams, PromptPayload};
    use serde_json::json;

    #[test]
    fn test_text_request_wire_format() {
        let request = GenerationRequest::new(PromptPayload::text("analyze this"))
            .with_params(GenerationParams::default().with_temperature(0.2));
        let wire = serde_json::to_value(GenerateContentRequest::from_domain(&request)).unwrap();

        assert_eq!(
            wire,
            json!({
                "contents": [{"parts": [{"text": "analyze this"}]}],
                "generationConfig": {
                    "temperature": 0.2,
                    "topK": 32,
                    "topP": 0.95,
                    "maxOutputTokens": 4096
                }
            })
        );
    }

    #[test]
    fn test_multimodal_request_has_inline_part() {
        let request = GenerationRequest::new(PromptPayload::multimodal(
            "what meal is this",
            "aGVsbG8=",
            "image/jpeg",
        ));
        let wire = serde_json::to_value(GenerateContentRequest::from_domain(&request)).unwrap();

        assert_eq!(
            wire["contents"][0]["parts"],
            json!([
                {"text": "what meal is this"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "aGVsbG8="}}
            ])
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [
                {"text": "{\"calories\""},
                {"text": ": 450}"}
            ]}}]
        }))
        .unwrap();

        assert_eq!(
            response.first_candidate_text().as_deref(),
            Some("{\"calories\": 450}")
        );
    }

    #[test]
    fn test_empty_response_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.first_candidate_text().is_none());

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": []}}]})).unwrap();
        assert!(response.first_candidate_text().is_none());
    }
}
