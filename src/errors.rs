use std::backtrace::Backtrace;

use thiserror::Error;

/// Boxed error used wherever a foreign body or handler error is carried along.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Failed to decode base64 body: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to construct request URL '{url}': {source}")]
    UrlConstruction {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build HTTP request: {0}")]
    InvalidRequest(#[from] http::Error),

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to read response body: {source}")]
    BodyRead {
        #[source]
        source: BoxError,
        // Not named `Backtrace` so the derive leaves `provide` alone on stable.
        stack: Box<Backtrace>,
    },

    #[error("Handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error("Unrecognized event payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AdapterError {
    pub fn url_construction(url: impl Into<String>, source: url::ParseError) -> Self {
        AdapterError::UrlConstruction {
            url: url.into(),
            source,
        }
    }

    /// Wraps a body read failure, capturing the call stack at this point.
    pub fn body_read(source: impl Into<BoxError>) -> Self {
        AdapterError::BodyRead {
            source: source.into(),
            stack: Box::new(Backtrace::capture()),
        }
    }

    /// Stack captured when a body read failed. Only populated when
    /// `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` enable capture.
    #[must_use]
    pub fn stack(&self) -> Option<&Backtrace> {
        match self {
            AdapterError::BodyRead { stack, .. } => Some(stack),
            _ => None,
        }
    }
}

impl From<AdapterError> for lambda_runtime::Diagnostic {
    fn from(error: AdapterError) -> Self {
        let error_type = match &error {
            AdapterError::Decode(_) => "DecodeError",
            AdapterError::UrlConstruction { .. } => "UrlConstructionError",
            AdapterError::InvalidRequest(_) | AdapterError::InvalidHeader { .. } => {
                "InvalidRequestError"
            }
            AdapterError::BodyRead { .. } => "BodyReadError",
            AdapterError::Handler(_) => "HandlerError",
            AdapterError::Payload(_) => "PayloadError",
            AdapterError::Config(_) => "ConfigError",
        };
        lambda_runtime::Diagnostic {
            error_type: error_type.to_string(),
            error_message: error.to_string(),
        }
    }
}
