// Demo Lambda: replies with a JSON description of the request it was given.

use albwrap::adapter::EnvelopeBody;
use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use lambda_runtime::Error;
use tracing::info;

async fn echo(request: Request<EnvelopeBody>) -> Result<Response<Full<Bytes>>, Error> {
    let (parts, body) = request.into_parts();
    let body = body.collect().await?.to_bytes();

    let headers: serde_json::Map<String, serde_json::Value> = parts
        .headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned().into(),
            )
        })
        .collect();

    info!(method = %parts.method, uri = %parts.uri, body_len = body.len(), "Echoing request");

    let payload = serde_json::json!({
        "method": parts.method.as_str(),
        "url": parts.uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(serde_json::to_vec(&payload)?)))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    albwrap::setup_logging();
    albwrap::runtime::run(echo).await
}
