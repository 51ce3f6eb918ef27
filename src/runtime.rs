//! Lambda runtime glue: event in, handler call, envelope out.

use std::future::Future;
use std::sync::Arc;

use http::{Request, Response};
use http_body::Body;
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};

use crate::adapter::{self, EnvelopeBody};
use crate::envelope::{GatewayProxyRequest, InboundEnvelope, OutboundEnvelope};
use crate::errors::{AdapterError, BoxError};

/// Which invoker produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Alb,
    ApiGateway,
}

impl Dialect {
    #[must_use]
    pub fn detect(payload: &Value) -> Self {
        if payload.pointer("/requestContext/elb").is_some() {
            Dialect::Alb
        } else if payload.get("resource").is_some()
            || payload.pointer("/requestContext/apiId").is_some()
        {
            Dialect::ApiGateway
        } else {
            Dialect::Alb
        }
    }
}

/// Deserializes `payload` in its detected dialect and brings it to ALB shape.
pub fn parse_event(payload: Value) -> Result<(Dialect, InboundEnvelope), AdapterError> {
    let dialect = Dialect::detect(&payload);
    let envelope = match dialect {
        Dialect::Alb => serde_json::from_value::<InboundEnvelope>(payload)?,
        Dialect::ApiGateway => serde_json::from_value::<GatewayProxyRequest>(payload)?.into_inbound(),
    };
    Ok((dialect, envelope))
}

/// Runs one event through `handler`.
pub async fn handle_event<H, Fut, B, E>(
    payload: Value,
    handler: &H,
) -> Result<OutboundEnvelope, AdapterError>
where
    H: Fn(Request<EnvelopeBody>) -> Fut,
    Fut: Future<Output = Result<Response<B>, E>>,
    B: Body,
    B::Error: Into<BoxError>,
    E: Into<BoxError>,
{
    let (dialect, envelope) = parse_event(payload).map_err(|e| {
        error!("Failed to parse event: {}", e);
        e
    })?;

    info!(
        ?dialect,
        method = %envelope.http_method,
        path = %envelope.path,
        target_group = envelope.target_group_arn().unwrap_or(""),
        "Received request"
    );

    let request = adapter::into_request(envelope).map_err(|e| {
        error!("Failed to materialize request: {}", e);
        e
    })?;

    let response = handler(request).await.map_err(|e| {
        let e = AdapterError::Handler(e.into());
        error!("{}", e);
        e
    })?;

    let outbound = adapter::into_outbound(response).await?;
    info!(status = outbound.status_code, "Request handled");
    Ok(outbound)
}

/// Serves `handler` on the Lambda runtime until it shuts down.
pub async fn run<H, Fut, B, E>(handler: H) -> Result<(), lambda_runtime::Error>
where
    H: Fn(Request<EnvelopeBody>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response<B>, E>> + Send,
    B: Body + Send,
    B::Error: Into<BoxError>,
    E: Into<BoxError>,
{
    let handler = Arc::new(handler);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        let span = info_span!("event", request_id = %event.context.request_id);
        async move { handle_event(event.payload, handler.as_ref()).await }.instrument(span)
    }))
    .await
}
