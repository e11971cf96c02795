//! Unified client facade over several translation providers.
//!
//! Pick a [`Provider`] once, then call [`TranslationDispatcher::translate`]
//! or one of the batch helpers. Adapters are pluggable through
//! [`ProviderAdapter`].

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::dispatcher::{AdapterFactory, DispatcherOptions, TranslationDispatcher};
pub use domain::error::{ErrorKind, TranslateError};
pub use domain::model::{
    AdapterInit, CacheKey, CompletionChoice, ExtractionStrategy, Provider, RawResponse, TextResult,
};
pub use domain::traits::ProviderAdapter;
pub use infrastructure::config::Config;
