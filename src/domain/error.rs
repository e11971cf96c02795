use thiserror::Error;

/// Coarse classification of a [`TranslateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid credential, selector or config file.
    Configuration,
    /// Transport, authentication, quota or malformed payload.
    Provider,
    /// The free-form answer did not contain the expected span.
    Extraction,
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Batch item {index} failed: {source}")]
    Batch {
        index: usize,
        #[source]
        source: Box<TranslateError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::Config(_) | TranslateError::Io(_) | TranslateError::Toml(_) => {
                ErrorKind::Configuration
            }
            TranslateError::Provider(_) | TranslateError::Http(_) | TranslateError::Json(_) => {
                ErrorKind::Provider
            }
            TranslateError::Extraction(_) => ErrorKind::Extraction,
            TranslateError::Batch { source, .. } => source.kind(),
        }
    }

    /// Index of the failed input when this error came out of a batch call.
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            TranslateError::Batch { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub(crate) fn in_batch(self, index: usize) -> Self {
        TranslateError::Batch {
            index,
            source: Box::new(self),
        }
    }
}
