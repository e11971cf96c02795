use crate::application::normalize::normalize;
use crate::domain::error::TranslateError;
use crate::domain::model::{AdapterInit, ExtractionStrategy, Provider};
use crate::domain::traits::ProviderAdapter;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::build_adapter;
use crate::infrastructure::storage::cache::MemoryCache;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Builds the provider adapter; called at most once per dispatcher
pub type AdapterFactory =
    Box<dyn Fn() -> Result<Arc<dyn ProviderAdapter>, TranslateError> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct DispatcherOptions {
    pub cache_enabled: bool,
    pub init: AdapterInit,
    /// Only read by the chat backend
    pub extraction: ExtractionStrategy,
    /// Upper bound of in-flight translations for the parallel batch calls
    pub max_workers: usize,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            cache_enabled: false,
            init: AdapterInit::Lazy,
            extraction: ExtractionStrategy::Quoted,
            max_workers: 4,
        }
    }
}

impl DispatcherOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache_enabled: config.cache,
            init: config.init,
            extraction: config.chat.extraction,
            max_workers: config.workers.max(1),
        }
    }
}

/// One call shape over whichever provider was picked at construction
///
/// Cloning is cheap and clones share the cache and the adapter handle.
#[derive(Clone)]
pub struct TranslationDispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    provider: Provider,
    options: DispatcherOptions,
    cache: MemoryCache,
    adapter: OnceCell<Arc<dyn ProviderAdapter>>,
    factory: AdapterFactory,
}

impl TranslationDispatcher {
    /// Dispatcher backed by the built-in HTTP adapter for `provider`
    pub fn new(
        provider: Provider,
        config: &Config,
        options: DispatcherOptions,
    ) -> Result<Self, TranslateError> {
        let config = config.clone();
        Self::with_factory(
            provider,
            options,
            Box::new(move || build_adapter(provider, &config)),
        )
    }

    /// Provider selector and options both come from `config`
    pub fn from_config(config: &Config) -> Result<Self, TranslateError> {
        let provider = config.provider.parse::<Provider>()?;
        Self::new(provider, config, DispatcherOptions::from_config(config))
    }

    pub fn with_factory(
        provider: Provider,
        options: DispatcherOptions,
        factory: AdapterFactory,
    ) -> Result<Self, TranslateError> {
        let adapter = match options.init {
            AdapterInit::Eager => {
                let adapter = factory()?;
                info!(provider = %provider, adapter = adapter.name(), "adapter initialized");
                OnceCell::new_with(Some(adapter))
            }
            AdapterInit::Lazy => OnceCell::new(),
        };

        Ok(Self {
            inner: Arc::new(Inner {
                provider,
                options,
                cache: MemoryCache::new(),
                adapter,
                factory,
            }),
        })
    }

    /// Dispatcher around an already constructed adapter
    pub fn with_adapter(
        provider: Provider,
        options: DispatcherOptions,
        adapter: Arc<dyn ProviderAdapter>,
    ) -> Self {
        let handle = Arc::clone(&adapter);
        Self {
            inner: Arc::new(Inner {
                provider,
                options,
                cache: MemoryCache::new(),
                adapter: OnceCell::new_with(Some(adapter)),
                factory: Box::new(move || Ok(Arc::clone(&handle))),
            }),
        }
    }

    pub fn provider(&self) -> Provider {
        self.inner.provider
    }

    pub fn options(&self) -> &DispatcherOptions {
        &self.inner.options
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.adapter.initialized()
    }

    pub fn cached_len(&self) -> usize {
        self.inner.cache.len()
    }

    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Translate `text` into `target_lang`
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        let inner = &self.inner;

        // 1. Memory Cache
        if inner.options.cache_enabled {
            if let Some(cached) = inner.cache.get(text, target_lang) {
                debug!(provider = %inner.provider, target_lang, "cache hit");
                return Ok(cached);
            }
        }

        // 2. Provider
        let adapter = self.adapter().await?;
        debug!(
            provider = adapter.name(),
            target_lang,
            chars = text.chars().count(),
            "requesting translation"
        );
        let raw = adapter.request(text, target_lang).await?;
        let translated = normalize(raw, inner.options.extraction)?;

        // 3. Write back to cache
        if inner.options.cache_enabled {
            inner.cache.insert(text, target_lang, translated.clone());
        }

        Ok(translated)
    }

    async fn adapter(&self) -> Result<Arc<dyn ProviderAdapter>, TranslateError> {
        self.inner
            .adapter
            .get_or_try_init(|| async {
                let adapter = (self.inner.factory)()?;
                info!(provider = %self.inner.provider, adapter = adapter.name(), "adapter initialized");
                Ok::<_, TranslateError>(adapter)
            })
            .await
            .map(Arc::clone)
    }
}
