//! Gemini REST adapter for the chat gateway port.
//!
//! Calls the `models/{model}:generateContent` endpoint directly. One
//! `reqwest::Client` is created per gateway and reused across calls for
//! the process lifetime. Sampling parameters are serialized into
//! `generationConfig` exactly as supplied — this adapter does not
//! interpret them.

use async_trait::async_trait;
use parley_application::{ChatGateway, ChatSession, GatewayError, GenerationParams};
use parley_domain::{Model, Turn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gateway implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    model: Model,
    params: GenerationParams,
    system_instruction: Option<String>,
}

impl GeminiGateway {
    /// Creates a new gateway with the provided API key, model, and
    /// fixed generation parameters.
    pub fn new(api_key: impl Into<String>, model: Model, params: GenerationParams) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model,
            params,
            system_instruction: None,
        }
    }

    /// Adds a system instruction sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        )
    }

    fn generation_config(&self) -> WireGenerationConfig {
        WireGenerationConfig {
            temperature: self.params.temperature,
            top_p: self.params.top_p,
            top_k: self.params.top_k,
            max_output_tokens: self.params.max_output_tokens,
        }
    }
}

#[async_trait]
impl ChatGateway for GeminiGateway {
    async fn start_chat(&self, history: &[Turn]) -> Result<Box<dyn ChatSession>, GatewayError> {
        debug!("Starting Gemini chat with {} history turns", history.len());
        Ok(Box::new(GeminiChatSession {
            client: self.client.clone(),
            url: self.endpoint_url(),
            history: history.iter().map(WireContent::from_turn).collect(),
            system_instruction: self
                .system_instruction
                .as_deref()
                .map(WireContent::system),
            generation_config: self.generation_config(),
        }))
    }

    fn model(&self) -> &Model {
        &self.model
    }
}

/// One chat round-trip primed with replay context.
struct GeminiChatSession {
    client: Client,
    url: String,
    history: Vec<WireContent>,
    system_instruction: Option<WireContent>,
    generation_config: WireGenerationConfig,
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    async fn send(&self, message: &str) -> Result<String, GatewayError> {
        let mut contents = self.history.clone();
        contents.push(WireContent::user(message));

        let request = GenerateContentRequest {
            contents,
            system_instruction: self.system_instruction.clone(),
            generation_config: self.generation_config.clone(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|err| GatewayError::Service {
                status: None,
                message: format!("Failed to parse Gemini response: {err}"),
            })?;

        extract_text_response(parsed)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Serialize, Clone)]
struct WireContent {
    role: String,
    parts: Vec<WirePart>,
}

impl WireContent {
    fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_str().to_string(),
            parts: vec![WirePart {
                text: turn.content.clone(),
            }],
        }
    }

    fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![WirePart {
                text: text.to_string(),
            }],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: "system".to_string(),
            parts: vec![WirePart {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize, Clone)]
struct WirePart {
    text: String,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, GatewayError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(GatewayError::EmptyReply)
}

fn map_http_error(status: StatusCode, body: String) -> GatewayError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    GatewayError::Service {
        status: Some(status.as_u16()),
        message,
    }
}
