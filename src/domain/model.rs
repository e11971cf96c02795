use crate::domain::error::TranslateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// 翻译后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Free Google web translator, no credential
    Google,
    /// DeepL REST API
    Deepl,
    /// Chat-completions LLM, answer is free-form
    Chat,
    /// Legacy completions endpoint
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Deepl => "deepl",
            Provider::Chat => "chat",
            Provider::OpenAi => "openai",
        }
    }

    pub fn requires_credential(&self) -> bool {
        !matches!(self, Provider::Google)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "deepl" => Ok(Provider::Deepl),
            "chat" | "bard" => Ok(Provider::Chat),
            "openai" | "completion" => Ok(Provider::OpenAi),
            other => Err(TranslateError::Config(format!(
                "Unknown translation provider: {:?}",
                other
            ))),
        }
    }
}

// 缓存键: (原文, 目标语言)，大小写敏感
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub target_lang: String,
}

impl CacheKey {
    pub fn new(text: &str, target_lang: &str) -> Self {
        Self {
            text: text.to_string(),
            target_lang: target_lang.to_string(),
        }
    }
}

/// Structured result of a commercial translation API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextResult {
    pub text: String,
    pub detected_source_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    pub finish_reason: Option<String>,
}

/// What an adapter hands back before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Already the bare translated string
    Text(String),
    Structured(TextResult),
    /// Free-form chat answer that still embeds the translation
    Chat(String),
    Completion(Vec<CompletionChoice>),
}

/// How the translation is located inside a free-form chat answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// First non-empty `"..."` span
    #[default]
    Quoted,
    /// First fenced block, `**bold**` or `` `inline` `` span
    Fenced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterInit {
    /// Built on the first translate call
    #[default]
    Lazy,
    /// Built while constructing the dispatcher
    Eager,
}
