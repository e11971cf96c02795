// HTTP client utilities
use crate::domain::error::TranslateError;
use crate::infrastructure::config::HttpConfig;
use reqwest::{Client, Response};
use std::time::Duration;

/// Create the HTTP client shared by one dispatcher's adapter
pub fn create_client(config: &HttpConfig) -> Result<Client, TranslateError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.as_str());

    if let Some(proxy) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}

/// Turn a non-success status into a provider error
pub(crate) async fn check_status(provider: &str, response: Response) -> Result<Response, TranslateError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = match status.as_u16() {
        400 => "Bad request",
        401 | 403 => "Authentication failed (check api_key)",
        404 => "Endpoint not found",
        413 => "Text too long",
        429 => "Too many requests",
        456 => "Quota exceeded",
        500..=599 => "Server-side exception",
        _ => "Unexpected status",
    };

    let message = format!(
        "{} API Error {}: {} {}",
        provider,
        status.as_u16(),
        reason,
        body.trim()
    );
    Err(TranslateError::Provider(message.trim_end().to_string()))
}

pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), path)
}
