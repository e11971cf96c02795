use crate::domain::error::TranslateError;
use crate::domain::model::RawResponse;
use crate::domain::traits::ProviderAdapter;
use crate::infrastructure::config::GoogleConfig;
use crate::infrastructure::network::http::{check_status, join_url};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Free Google web translator (`client=gtx`)
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, config: &GoogleConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn request(&self, text: &str, target_lang: &str) -> Result<RawResponse, TranslateError> {
        // 空白文本不发请求，接口对它不返回任何片段
        if text.trim().is_empty() {
            return Ok(RawResponse::Text(text.to_string()));
        }

        let params = [
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", target_lang),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self
            .client
            .get(join_url(&self.endpoint, "/translate_a/single"))
            .query(&params)
            .send()
            .await?;
        let body = check_status("Google", response).await?.json::<Value>().await?;

        Ok(RawResponse::Text(join_segments(&body)?))
    }
}

// Response shape: [[["译文", "原文", ...], ...], null, "en", ...]
// Long input is split into sentences, one segment each.
fn join_segments(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Provider("Malformed Google response".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::Provider(
            "Google response contained no translation".to_string(),
        ));
    }

    Ok(translated)
}
