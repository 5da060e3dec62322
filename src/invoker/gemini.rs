//! Gemini API client for plan generation
//!
//! Posts a single generateContent request in structured-output mode (JSON
//! mime type plus response schema) and returns the raw text payload.
//! Uses a long-lived reqwest::Client for connection pooling.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{PlanError, Result};
use crate::invoker::ModelInvoker;
use crate::prompt::ModelRequest;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Reusable Gemini client (connection-pooled)
pub struct GeminiInvoker {
    client: Client,
    api_key: String,
}

impl GeminiInvoker {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, api_key }
    }
}

#[async_trait]
impl ModelInvoker for GeminiInvoker {
    async fn invoke(&self, request: &ModelRequest) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(PlanError::Invocation(
                "GEMINI_API_KEY not configured".to_string(),
            ));
        }

        let url = format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, request.model, self.api_key
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.schema.clone(),
            },
        };

        info!(model = %request.model, "Calling Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                PlanError::Invocation(format!("Gemini API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, "Gemini API error response: {}", error_text);
            return Err(PlanError::Invocation(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response envelope: {}", e);
            PlanError::Invocation(format!("Gemini envelope error: {}", e))
        })?;

        let Some(candidate) = payload.candidates.first() else {
            return Err(PlanError::EmptyResponse);
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if reason != "STOP" {
                info!(finish_reason = reason, "Gemini finished early");
            }
        }

        let text = candidate
            .content
            .parts
            .first()
            .map(|part| part.text.clone())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(PlanError::EmptyResponse);
        }

        info!(bytes = text.len(), "Gemini response received");

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
    finish_reason: Option<String>,
}
