use crate::domain::error::TranslateError;
use crate::domain::model::RawResponse;
use async_trait::async_trait;

/// Trait for translation providers
///
/// One implementation per backend. The adapter issues the request and
/// returns the provider's answer untouched; turning it into plain text is
/// the dispatcher's job. Any transport or authentication problem must come
/// back as an error, never as an empty answer.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Request a translation of `text` into `target_lang`
    async fn request(&self, text: &str, target_lang: &str) -> Result<RawResponse, TranslateError>;
}
