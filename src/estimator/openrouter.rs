// ABOUTME: OpenRouter chat-completions client implementing the meal estimator trait
// ABOUTME: Bounded request timeout, temperature 0 for input-stable estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use super::{estimation_prompt, normalize_meal_text, parse_estimate, MealEstimator};
use crate::config::EstimatorConfig;
use crate::errors::{AppError, AppResult};
use crate::models::MacroTotals;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Attribution headers required by the OpenRouter API
const APP_REFERER: &str = "https://mealtrack.app";
const APP_TITLE: &str = "mealtrack-server";

/// Meal estimator backed by the OpenRouter chat-completions endpoint
#[derive(Debug)]
pub struct OpenRouterEstimator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    /// Zero temperature keeps same input -> same output
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenRouterEstimator {
    /// Create a client from configuration
    ///
    /// The request timeout bounds every estimation call; a hung upstream
    /// surfaces as `EstimationFailed` instead of blocking the caller.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no API key is configured, or an internal
    /// error if the HTTP client cannot be constructed
    pub fn new(config: &EstimatorConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config_missing("OPENROUTER_API_KEY is not set"))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl MealEstimator for OpenRouterEstimator {
    async fn estimate(&self, meal_text: &str) -> AppResult<MacroTotals> {
        let normalized = normalize_meal_text(meal_text);
        let prompt = estimation_prompt(&normalized);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.0,
        };

        debug!(model = %self.model, "Requesting meal estimation");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", APP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Meal estimation request failed");
                AppError::estimation_failed("Estimator request failed").with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Meal estimation request rejected");
            return Err(AppError::estimation_failed(format!(
                "Estimator returned HTTP {status}"
            ))
            .with_details(serde_json::json!({ "body": body })));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::estimation_failed("Estimator response was not valid JSON").with_source(e)
        })?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| AppError::estimation_failed("Estimator returned no choices"))?;

        parse_estimate(content)
    }
}
