pub mod chat;
pub mod completion;
pub mod deepl;
pub mod google;
pub mod http;

use crate::domain::error::TranslateError;
use crate::domain::model::Provider;
use crate::domain::traits::ProviderAdapter;
use crate::infrastructure::config::Config;
use std::sync::Arc;

pub use chat::ChatTranslator;
pub use completion::CompletionTranslator;
pub use deepl::DeeplTranslator;
pub use google::GoogleTranslator;

/// Build the adapter for `provider` from its config section
///
/// Fails with a configuration error when a required credential is missing.
pub fn build_adapter(
    provider: Provider,
    config: &Config,
) -> Result<Arc<dyn ProviderAdapter>, TranslateError> {
    let client = http::create_client(&config.http)?;

    let adapter: Arc<dyn ProviderAdapter> = match provider {
        Provider::Google => Arc::new(GoogleTranslator::new(client, &config.google)),
        Provider::Deepl => Arc::new(DeeplTranslator::new(client, &config.deepl)?),
        Provider::Chat => Arc::new(ChatTranslator::new(client, &config.chat)?),
        Provider::OpenAi => Arc::new(CompletionTranslator::new(client, &config.openai)?),
    };

    Ok(adapter)
}
