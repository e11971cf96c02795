use crate::domain::error::TranslateError;
use crate::domain::model::RawResponse;
use crate::domain::traits::ProviderAdapter;
use crate::infrastructure::config::ChatConfig;
use crate::infrastructure::network::http::{check_status, join_url};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize, Debug)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// LLM chat backend, any OpenAI-compatible `/v1/chat/completions` server
pub struct ChatTranslator {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl ChatTranslator {
    pub fn new(client: Client, config: &ChatConfig) -> Result<Self, TranslateError> {
        let api_key = config.api_key.as_deref().unwrap_or("");
        if api_key.is_empty() {
            return Err(TranslateError::Config(
                "Chat API key not configured".to_string(),
            ));
        }

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }
}

// The source stays unquoted so the first quoted span of the answer is the translation
pub fn chat_prompt(text: &str, target_lang: &str) -> String {
    format!("translate {} to {} only", text, target_lang)
}

#[async_trait]
impl ProviderAdapter for ChatTranslator {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn request(&self, text: &str, target_lang: &str) -> Result<RawResponse, TranslateError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": chat_prompt(text, target_lang)}
            ],
        });

        let response = self
            .client
            .post(join_url(&self.endpoint, "/v1/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status("Chat", response)
            .await?
            .json::<ChatResponse>()
            .await?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TranslateError::Provider("Chat response had no answer".to_string()))?;

        Ok(RawResponse::Chat(answer))
    }
}
