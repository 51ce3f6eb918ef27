use albwrap::AdapterError;
use albwrap::adapter::into_outbound;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use http::{Response, StatusCode};
use http_body::Frame;
use http_body_util::{Empty, Full, StreamBody};

#[tokio::test]
async fn test_body_round_trips_through_base64() {
    let raw: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00binary";
    let response = Response::new(Full::new(Bytes::from_static(raw)));

    let outbound = into_outbound(response).await.unwrap();
    assert!(outbound.is_base64_encoded);
    assert_eq!(STANDARD.decode(&outbound.body).unwrap(), raw);
}

#[tokio::test]
async fn test_text_body_is_still_base64_encoded() {
    let response = Response::builder()
        .header("content-type", "text/plain")
        .body(Full::new(Bytes::from("hello")))
        .unwrap();

    let outbound = into_outbound(response).await.unwrap();
    assert_eq!(outbound.body, "aGVsbG8=");
    assert!(outbound.is_base64_encoded);
}

#[tokio::test]
async fn test_single_value_headers_take_first_value() {
    let response = Response::builder()
        .status(StatusCode::CREATED)
        .header("set-cookie", "a=1")
        .header("set-cookie", "b=2")
        .header("content-type", "application/json")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let outbound = into_outbound(response).await.unwrap();
    assert_eq!(outbound.status_code, 201);
    assert_eq!(outbound.status_description, "201 Created");
    assert_eq!(
        outbound.multi_value_headers.get("set-cookie"),
        Some(&vec!["a=1".to_string(), "b=2".to_string()])
    );
    for (key, values) in &outbound.multi_value_headers {
        assert_eq!(outbound.headers.get(key), values.first());
    }
}

#[tokio::test]
async fn test_no_headers_and_empty_body() {
    let outbound = into_outbound(Response::new(Empty::<Bytes>::new()))
        .await
        .unwrap();

    assert!(outbound.headers.is_empty());
    assert!(outbound.multi_value_headers.is_empty());
    assert_eq!(outbound.body, "");
    assert_eq!(outbound.status_description, "200 OK");
}

#[tokio::test]
async fn test_body_read_failure_is_wrapped() {
    let frames: Vec<Result<Frame<Bytes>, std::io::Error>> = vec![
        Ok(Frame::data(Bytes::from("partial"))),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer")),
    ];
    let response = Response::new(StreamBody::new(futures::stream::iter(frames)));

    let err = into_outbound(response).await.unwrap_err();
    assert!(matches!(err, AdapterError::BodyRead { .. }));
    assert!(err.stack().is_some());

    let source = std::error::Error::source(&err).expect("cause preserved");
    assert_eq!(source.to_string(), "reset by peer");
}

#[tokio::test]
async fn test_outbound_serializes_with_alb_field_names() {
    let response = Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("content-type", "text/plain")
        .body(Full::new(Bytes::from("nope")))
        .unwrap();

    let outbound = into_outbound(response).await.unwrap();
    let json = serde_json::to_value(&outbound).unwrap();

    assert_eq!(json["statusCode"], 404);
    assert_eq!(json["statusDescription"], "404 Not Found");
    assert_eq!(json["headers"]["content-type"], "text/plain");
    assert_eq!(json["multiValueHeaders"]["content-type"][0], "text/plain");
    assert_eq!(json["isBase64Encoded"], true);
    assert_eq!(json["body"], "bm9wZQ==");
}
