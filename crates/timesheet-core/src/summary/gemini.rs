//! Gemini `generateContent` client.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::prompt::PromptTemplate;
use super::{Fallbacks, Summarizer};
use crate::error::{CoreError, Result};
use crate::history::{HistoryItem, Locale};
use crate::storage::SummaryConfig;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Summarizes history through the Gemini REST API.
pub struct GeminiSummarizer {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    system_instruction: String,
    template: PromptTemplate,
    fallbacks: Fallbacks,
}

impl GeminiSummarizer {
    pub fn new(config: &SummaryConfig, api_key: Option<String>, locale: Locale) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            system_instruction: config.system_instruction.clone(),
            template: PromptTemplate::new(config.template.clone()),
            fallbacks: Fallbacks::for_locale(locale),
        }
    }

    /// Like [`new`](Self::new), with the key looked up from the environment
    /// or the OS keyring.
    pub fn from_env(config: &SummaryConfig, locale: Locale) -> Self {
        Self::new(config, super::credentials::resolve_api_key(), locale)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate(&self, api_key: &str, prompt: String) -> Result<String> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": self.system_instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": self.temperature },
        });

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::SummaryUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CoreError::SummaryUnavailable(format!(
                "HTTP {status}: {text}"
            )));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| CoreError::SummaryUnavailable(e.to_string()))?;
        Ok(parsed.text())
    }
}

impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, items: &[HistoryItem]) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return self.fallbacks.missing_key.clone();
        };
        if items.is_empty() {
            return self.fallbacks.empty_history.clone();
        }

        let prompt = self.template.render(items);
        debug!(model = %self.model, items = items.len(), "requesting summary");
        match self.generate(api_key, prompt).await {
            Ok(text) if text.trim().is_empty() => self.fallbacks.empty_response.clone(),
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "summary request failed");
                self.fallbacks.upstream_error.clone()
            }
        }
    }
}
