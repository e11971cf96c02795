//! 测试用的可编程适配器
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use translang::{ProviderAdapter, RawResponse, TranslateError};

type Responder = Box<dyn Fn(&str, &str) -> Result<RawResponse, TranslateError> + Send + Sync>;

/// Adapter that answers from a closure and records how it was used
pub struct ScriptedAdapter {
    respond: Responder,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedAdapter {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, &str) -> Result<RawResponse, TranslateError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delays: HashMap::new(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Uppercases the text and tags it with the target language: `HELLO@fr`
    pub fn echo() -> Self {
        Self::new(|text, lang| Ok(RawResponse::Text(format!("{}@{}", text.to_uppercase(), lang))))
    }

    pub fn with_delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn request(&self, text: &str, target_lang: &str) -> Result<RawResponse, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }

        let result = (self.respond)(text, target_lang);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub fn shared(adapter: ScriptedAdapter) -> Arc<ScriptedAdapter> {
    Arc::new(adapter)
}
