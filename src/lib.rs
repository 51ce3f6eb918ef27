//! albwrap - run plain `http` request handlers behind an ALB target group.
//!
//! The crate translates between Lambda load-balancer events and the `http`
//! crate's request/response types:
//! 1. An inbound ALB envelope becomes an `http::Request` with a reconstructed URL
//! 2. The handler's `http::Response` becomes an outbound ALB envelope
//!
//! API Gateway REST proxy events are accepted too; they are normalized into the
//! ALB shape first.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::{Request, Response};
//! use http_body_util::Full;
//! use albwrap::adapter::EnvelopeBody;
//!
//! async fn hello(_req: Request<EnvelopeBody>) -> Result<Response<Full<Bytes>>, http::Error> {
//!     Response::builder()
//!         .header("content-type", "text/plain")
//!         .body(Full::new(Bytes::from_static(b"hello")))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     albwrap::setup_logging();
//!     albwrap::runtime::run(hello).await
//! }
//! ```

pub mod adapter;
pub mod core;
pub mod envelope;
pub mod errors;
pub mod runtime;

pub use adapter::{EnvelopeBody, into_outbound, into_request};
pub use envelope::{GatewayProxyRequest, InboundEnvelope, OutboundEnvelope};
pub use errors::AdapterError;

use crate::core::config::{AdapterConfig, LogFormat};

/// Configure structured logging from `ALBWRAP_LOG_FORMAT` / `ALBWRAP_LOG_LEVEL`.
///
/// Falls back to JSON at `INFO` if the variables are invalid. Safe to call
/// more than once; only the first call installs a subscriber.
///
/// # Example
///
/// ```
/// albwrap::setup_logging();
/// ```
pub fn setup_logging() {
    let config = AdapterConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}; using default logging");
        AdapterConfig::default()
    });
    setup_logging_with(&config);
}

/// Configure logging with an explicit config.
pub fn setup_logging_with(config: &AdapterConfig) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let level = LevelFilter::from_level(config.log_level);
    let registry = tracing_subscriber::registry().with(level);

    // A subscriber may already be installed (tests, repeated setup).
    let _ = match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };
}
