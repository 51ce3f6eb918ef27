//! Inbound envelope to `http::Request`.

use http::header::{HeaderName, HeaderValue};
use http::{Method, Request, Uri};
use tracing::debug;
use url::Url;
use url::form_urlencoded;

use super::body::EnvelopeBody;
use crate::envelope::{InboundEnvelope, MultiValueMap};
use crate::errors::AdapterError;

/// Builds the canonical request for an envelope.
///
/// Only the single-value `headers` map is applied (each entry overwrites);
/// `multiValueHeaders` feed URL reconstruction but are not copied onto the
/// request. The path reaches the handler exactly as sent: dot segments and
/// backslashes are not rewritten.
///
/// # Errors
///
/// Returns [`AdapterError::UrlConstruction`] when proto/host/path do not form
/// a URL, and [`AdapterError::InvalidRequest`] or [`AdapterError::InvalidHeader`]
/// when the method or a header is rejected by the `http` types.
pub fn into_request(envelope: InboundEnvelope) -> Result<Request<EnvelopeBody>, AdapterError> {
    let raw = compose_url(&envelope);
    let url = Url::parse(&raw).map_err(|e| AdapterError::url_construction(raw.as_str(), e))?;
    // `Url` normalizes the path; only fall back to it for bytes `Uri` refuses.
    let uri = Uri::try_from(raw.as_str())
        .or_else(|_| Uri::try_from(url.as_str()))
        .map_err(http::Error::from)?;
    let method = Method::from_bytes(envelope.http_method.as_bytes()).map_err(http::Error::from)?;

    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .body(EnvelopeBody::new(envelope.body, envelope.is_base64_encoded))?;

    let headers = request.headers_mut();
    for (name, value) in &envelope.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| AdapterError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| AdapterError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        headers.insert(header_name, header_value);
    }

    debug!(
        method = %request.method(),
        uri = %request.uri(),
        headers = request.headers().len(),
        base64 = envelope.is_base64_encoded,
        "Materialized request"
    );

    Ok(request)
}

/// Reconstructs the absolute URL the client asked for.
///
/// # Errors
///
/// Returns [`AdapterError::UrlConstruction`] if the composed string does not
/// parse, typically because `host` or `x-forwarded-proto` is missing.
pub fn url_for_request(envelope: &InboundEnvelope) -> Result<Url, AdapterError> {
    let raw = compose_url(envelope);
    Url::parse(&raw).map_err(|e| AdapterError::url_construction(raw, e))
}

/// `"{proto}://{host}{path}?{query}"`, unparsed.
#[must_use]
pub fn compose_url(envelope: &InboundEnvelope) -> String {
    let headers = effective_headers(envelope);
    let proto = header_value(&headers, "x-forwarded-proto").unwrap_or_default();
    let host = header_value(&headers, "host").unwrap_or_default();

    format!(
        "{proto}://{host}{path}?{query}",
        path = envelope.path,
        query = encode_query(&merged_query(envelope)),
    )
}

/// Multi-value headers with every single-value header laid over them.
///
/// An overlaid header replaces any multi-value entry whose name matches
/// ignoring ASCII case; other multi-value entries survive untouched.
#[must_use]
pub fn effective_headers(envelope: &InboundEnvelope) -> MultiValueMap {
    let mut headers = envelope.multi_value_headers.clone();
    for (name, value) in &envelope.headers {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        headers.insert(name.clone(), vec![value.clone()]);
    }
    headers
}

/// First value of `name`, compared ignoring ASCII case.
#[must_use]
pub fn header_value<'a>(headers: &'a MultiValueMap, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(name))
        .find_map(|(_, vs)| vs.first())
        .map(String::as_str)
}

/// Multi-value query parameters with single-value ones appended per key.
#[must_use]
pub fn merged_query(envelope: &InboundEnvelope) -> MultiValueMap {
    let mut query = envelope.multi_value_query_string_parameters.clone();
    for (key, value) in &envelope.query_string_parameters {
        query.entry(key.clone()).or_default().push(value.clone());
    }
    query
}

/// Form-encodes `query`, keys sorted, values in list order.
#[must_use]
pub fn encode_query(query: &MultiValueMap) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in query {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
