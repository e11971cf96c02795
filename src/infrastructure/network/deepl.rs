use crate::domain::error::TranslateError;
use crate::domain::model::{RawResponse, TextResult};
use crate::domain::traits::ProviderAdapter;
use crate::infrastructure::config::DeeplConfig;
use crate::infrastructure::network::http::{check_status, join_url};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com";
pub const DEEPL_PRO_ENDPOINT: &str = "https://api.deepl.com";

/// Free-plan keys end with `:fx`; everything else is a Pro key
pub fn endpoint_for_key(api_key: &str) -> &'static str {
    if api_key.trim_end().ends_with(":fx") {
        DEEPL_FREE_ENDPOINT
    } else {
        DEEPL_PRO_ENDPOINT
    }
}

#[derive(Deserialize, Debug)]
struct DeeplResponse {
    translations: Vec<TextResult>,
}

/// DeepL REST API translator
pub struct DeeplTranslator {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl DeeplTranslator {
    pub fn new(client: Client, config: &DeeplConfig) -> Result<Self, TranslateError> {
        let api_key = config.api_key.as_deref().unwrap_or("");
        if api_key.is_empty() {
            return Err(TranslateError::Config(
                "DeepL API key not configured".to_string(),
            ));
        }

        let endpoint = match config.endpoint.as_deref().filter(|e| !e.is_empty()) {
            Some(endpoint) => endpoint.to_string(),
            None => endpoint_for_key(api_key).to_string(),
        };

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProviderAdapter for DeeplTranslator {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn request(&self, text: &str, target_lang: &str) -> Result<RawResponse, TranslateError> {
        // DeepL 语言代码要求大写 (EN-US, DE, FR)
        let target = target_lang.to_uppercase();
        let params = [("text", text), ("target_lang", target.as_str())];

        let response = self
            .client
            .post(join_url(&self.endpoint, "/v2/translate"))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;
        let response = check_status("DeepL", response)
            .await?
            .json::<DeeplResponse>()
            .await?;

        let translation = response
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::Provider("No translation returned".to_string()))?;

        Ok(RawResponse::Structured(translation))
    }
}
