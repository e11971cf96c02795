use crate::domain::error::TranslateError;
use crate::domain::model::{ExtractionStrategy, RawResponse};
use once_cell::sync::Lazy;
use regex::Regex;

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));

// fenced block (optional info string line) | **bold** | `inline`
static FENCED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:[A-Za-z0-9_+-]*\n)?(.*?)```|\*\*(.+?)\*\*|`([^`\n]+)`")
        .expect("valid regex")
});

/// Reduce a provider's raw answer to the bare translated text
pub fn normalize(raw: RawResponse, strategy: ExtractionStrategy) -> Result<String, TranslateError> {
    match raw {
        RawResponse::Text(text) => Ok(text),
        RawResponse::Structured(result) => Ok(result.text),
        RawResponse::Chat(answer) => extract(&answer, strategy),
        RawResponse::Completion(choices) => choices
            .into_iter()
            .next()
            .map(|choice| choice.text.trim().to_string())
            .ok_or_else(|| TranslateError::Provider("Completion returned no choices".to_string())),
    }
}

/// Locate the translation inside a free-form chat answer
///
/// Only the first span counts. An empty first span is an error rather than
/// a reason to look further, since later spans may quote the source text.
pub fn extract(answer: &str, strategy: ExtractionStrategy) -> Result<String, TranslateError> {
    let label = match strategy {
        ExtractionStrategy::Quoted => "quoted",
        ExtractionStrategy::Fenced => "fenced",
    };

    let first = match strategy {
        ExtractionStrategy::Quoted => QUOTED
            .captures(answer)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
        ExtractionStrategy::Fenced => FENCED.captures(answer).and_then(|caps| {
            (1..=3)
                .find_map(|group| caps.get(group))
                .map(|m| m.as_str().trim().to_string())
        }),
    };

    match first {
        Some(span) if !span.trim().is_empty() => Ok(span),
        Some(_) => Err(TranslateError::Extraction(format!(
            "first {} span is empty in answer: {:?}",
            label, answer
        ))),
        None => Err(TranslateError::Extraction(format!(
            "no {} span in answer: {:?}",
            label, answer
        ))),
    }
}
