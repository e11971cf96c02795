use crate::domain::error::TranslateError;
use crate::domain::model::{CompletionChoice, RawResponse};
use crate::domain::traits::ProviderAdapter;
use crate::infrastructure::config::OpenAiConfig;
use crate::infrastructure::network::http::{check_status, join_url};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

/// Generic completion backend (`/v1/completions`)
///
/// The key is held by this instance, so dispatchers with different
/// credentials can run side by side.
pub struct CompletionTranslator {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl CompletionTranslator {
    pub fn new(client: Client, config: &OpenAiConfig) -> Result<Self, TranslateError> {
        let api_key = config.api_key.as_deref().unwrap_or("");
        if api_key.is_empty() {
            return Err(TranslateError::Config(
                "OpenAI API key not configured".to_string(),
            ));
        }

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

pub fn completion_prompt(text: &str, target_lang: &str) -> String {
    format!(
        "Translate the following text to {}: {}\n\nTranslation:",
        target_lang, text
    )
}

#[async_trait]
impl ProviderAdapter for CompletionTranslator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn request(&self, text: &str, target_lang: &str) -> Result<RawResponse, TranslateError> {
        let body = json!({
            "model": self.model,
            "prompt": completion_prompt(text, target_lang),
            "max_tokens": self.max_tokens,
        });

        let response = self
            .client
            .post(join_url(&self.endpoint, "/v1/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status("OpenAI", response)
            .await?
            .json::<CompletionResponse>()
            .await?;

        Ok(RawResponse::Completion(response.choices))
    }
}
