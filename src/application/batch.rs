use crate::application::dispatcher::TranslationDispatcher;
use crate::domain::error::TranslateError;
use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

impl TranslationDispatcher {
    /// Translate `texts` one after another, in input order
    ///
    /// Stops at the first failure and reports its index.
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        target_lang: &str,
    ) -> Result<Vec<String>, TranslateError> {
        let mut results = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            match self.translate(text.as_ref(), target_lang).await {
                Ok(translated) => results.push(translated),
                Err(e) => {
                    warn!(index, error = %e, "batch item failed, aborting batch");
                    return Err(e.in_batch(index));
                }
            }
        }
        Ok(results)
    }

    /// Translate `texts` concurrently on at most `max_workers` tasks
    ///
    /// Every item runs to completion. If any failed, the failure with the
    /// lowest index is returned.
    pub async fn translate_batch_parallel<S: AsRef<str>>(
        &self,
        texts: &[S],
        target_lang: &str,
    ) -> Result<Vec<String>, TranslateError> {
        let settled = self.translate_batch_settled(texts, target_lang).await;

        let mut results = Vec::with_capacity(settled.len());
        for (index, result) in settled.into_iter().enumerate() {
            results.push(result.map_err(|e| e.in_batch(index))?);
        }
        Ok(results)
    }

    /// Like [`translate_batch_parallel`](Self::translate_batch_parallel) but
    /// keeps one result per input instead of failing the whole batch
    pub async fn translate_batch_settled<S: AsRef<str>>(
        &self,
        texts: &[S],
        target_lang: &str,
    ) -> Vec<Result<String, TranslateError>> {
        let semaphore = Arc::new(Semaphore::new(self.options().max_workers.max(1)));

        // Handles stay in input order, so joining them in sequence restores it
        let handles: Vec<_> = texts
            .iter()
            .map(|text| {
                let dispatcher = self.clone();
                let semaphore = Arc::clone(&semaphore);
                let text = text.as_ref().to_string();
                let target_lang = target_lang.to_string();

                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| {
                        TranslateError::Provider(format!("Worker pool closed: {}", e))
                    })?;
                    dispatcher.translate(&text, &target_lang).await
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(index, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    Err(TranslateError::Provider(format!(
                        "Translation worker failed: {}",
                        e
                    )))
                });
                if let Err(e) = &result {
                    warn!(index, error = %e, "batch item failed");
                }
                result
            })
            .collect()
    }
}
