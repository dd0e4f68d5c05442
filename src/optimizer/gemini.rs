// src/optimizer/gemini.rs
//! Gemini `generateContent` client

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::prompts::optimization_prompt;
use super::schema::{optimization_result_schema, strip_code_fences, validate};
use super::{validate_inputs, ResumeOptimizer, RetryPolicy};
use crate::error::OptimizationError;
use crate::types::response::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part, ThinkingConfig,
};
use crate::types::OptimizationResult;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_THINKING_BUDGET: u32 = 8000;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Token budget for model reasoning, `None` leaves the model default
    pub thinking_budget: Option<u32>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    settings: GeminiSettings,
    schema: Value,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            settings,
            schema: optimization_result_schema(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &self.schema,
                thinking_config: self
                    .settings
                    .thinking_budget
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            },
        }
    }

    /// One request to the model, returning the answer text
    async fn generate(&self, prompt: &str) -> Result<String, OptimizationError> {
        let url = self.endpoint();
        debug!("Calling model endpoint: {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = OptimizationError::from_response(status.as_u16(), &body);

            warn!("Model API returned {}: {}", status, error);
            return Err(error);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Model call succeeded: prompt_tokens={}, output_tokens={}, thought_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count, usage.thoughts_token_count
            );
        }

        body.text().ok_or_else(|| OptimizationError::EmptyResponse {
            finish_reason: body.finish_reason().unwrap_or("UNKNOWN").to_string(),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> OptimizationError {
        if e.is_timeout() {
            OptimizationError::Timeout(self.settings.timeout.as_secs())
        } else {
            OptimizationError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ResumeOptimizer for GeminiClient {
    async fn optimize(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<OptimizationResult, OptimizationError> {
        validate_inputs(resume_text, job_description)?;

        if self.settings.api_key.trim().is_empty() {
            return Err(OptimizationError::Auth {
                status: 401,
                message: "No API key configured (set GEMINI_API_KEY)".to_string(),
            });
        }

        let prompt = optimization_prompt(resume_text, job_description);
        info!(
            "Optimizing resume with {} ({} resume chars, {} job chars)",
            self.settings.model,
            resume_text.len(),
            job_description.len()
        );

        let text = self
            .settings
            .retry
            .run(|_| self.generate(&prompt))
            .await?;

        parse_result(&text, &self.schema)
    }
}

/// Turn the model's answer text into a typed result, validating it first
pub fn parse_result(text: &str, schema: &Value) -> Result<OptimizationResult, OptimizationError> {
    let payload = strip_code_fences(text);

    let value: Value = serde_json::from_str(payload).map_err(|e| {
        warn!("Model output is not valid JSON: {}. Raw payload: {}", e, text);
        OptimizationError::SchemaMismatch {
            path: "$".to_string(),
            reason: format!("invalid JSON: {}", e),
        }
    })?;

    if let Err(e) = validate(&value, schema) {
        warn!("{}. Raw payload: {}", e, text);
        return Err(e);
    }

    let result: OptimizationResult = serde_json::from_value(value).map_err(|e| {
        warn!("Model output could not be decoded: {}. Raw payload: {}", e, text);
        OptimizationError::SchemaMismatch {
            path: "$".to_string(),
            reason: e.to_string(),
        }
    })?;

    if !(0.0..=100.0).contains(&result.ats_score) {
        warn!("ATS score out of range: {}", result.ats_score);
    }

    Ok(result)
}
