//! `http::Response` to outbound envelope.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use http::{HeaderMap, Response, StatusCode};
use http_body::Body;
use http_body_util::BodyExt;
use tracing::{debug, error};

use crate::envelope::{MultiValueMap, OutboundEnvelope, SingleValueMap};
use crate::errors::{AdapterError, BoxError};

/// Serializes a handler response, reading its body to completion.
///
/// # Errors
///
/// Returns [`AdapterError::BodyRead`] if the body stream fails.
pub async fn into_outbound<B>(response: Response<B>) -> Result<OutboundEnvelope, AdapterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let (parts, body) = response.into_parts();

    let raw_body = body
        .collect()
        .await
        .map_err(|e| {
            let e = AdapterError::body_read(e);
            error!(error = %e, "Response body could not be read");
            e
        })?
        .to_bytes();

    let multi_value_headers = multi_value_headers(&parts.headers);
    let headers = single_value_headers(&multi_value_headers);

    debug!(
        status = parts.status.as_u16(),
        body_len = raw_body.len(),
        headers = multi_value_headers.len(),
        "Serialized response"
    );

    Ok(OutboundEnvelope {
        status_code: parts.status.as_u16(),
        status_description: status_description(parts.status),
        headers,
        multi_value_headers,
        body: STANDARD.encode(&raw_body),
        is_base64_encoded: true,
    })
}

/// `"200 OK"` style status line; just the code when no reason is known.
#[must_use]
pub fn status_description(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

#[must_use]
pub fn multi_value_headers(headers: &HeaderMap) -> MultiValueMap {
    let mut out = MultiValueMap::new();
    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        out.insert(name.as_str().to_string(), values);
    }
    out
}

/// First value per key. Keys with no values are skipped.
#[must_use]
pub fn single_value_headers(headers: &MultiValueMap) -> SingleValueMap {
    headers
        .iter()
        .filter_map(|(k, vs)| vs.first().map(|v| (k.clone(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_description_uses_canonical_reason() {
        assert_eq!(status_description(StatusCode::OK), "200 OK");
        assert_eq!(status_description(StatusCode::NOT_FOUND), "404 Not Found");
        assert_eq!(
            status_description(StatusCode::from_u16(599).unwrap()),
            "599"
        );
    }

    #[test]
    fn single_value_headers_take_first_and_skip_empty() {
        let headers = MultiValueMap::from([
            ("set-cookie".into(), vec!["a=1".into(), "b=2".into()]),
            ("x-empty".into(), vec![]),
        ]);

        let single = single_value_headers(&headers);
        assert_eq!(single.get("set-cookie").map(String::as_str), Some("a=1"));
        assert!(!single.contains_key("x-empty"));
    }

    #[test]
    fn multi_value_headers_keep_insertion_order_per_key() {
        let mut map = HeaderMap::new();
        map.append("vary", "accept".parse().unwrap());
        map.append("vary", "origin".parse().unwrap());

        let multi = multi_value_headers(&map);
        assert_eq!(
            multi.get("vary"),
            Some(&vec!["accept".to_string(), "origin".to_string()])
        );
    }
}
