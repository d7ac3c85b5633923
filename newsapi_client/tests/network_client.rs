mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{MockTransport, RecordingLogger};
use newsapi_client::{
    Error, LogLevel, LogRecord, NetworkClient, RequestDescriptor, TransportError,
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: i64,
    name: String,
}

fn descriptor(path: &str) -> RequestDescriptor {
    RequestDescriptor::get(&format!("https://api.example.com{}", path)).unwrap()
}

fn client(transport: MockTransport) -> NetworkClient<MockTransport, RecordingLogger> {
    NetworkClient::new(transport, RecordingLogger::default())
}

#[tokio::test]
async fn ok_body_decodes_into_target_shape() {
    let client = client(MockTransport::new().respond("/item", 200, r#"{"id":1,"name":"Test Item"}"#));

    let item: Item = client
        .request(&descriptor("/item"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(
        item,
        Item {
            id: 1,
            name: "Test Item".to_string()
        }
    );

    let lines = client.logger().lines();
    assert!(lines.contains(&(LogLevel::Debug, "Response Status Code: 200".to_string())));
    assert!(lines.contains(&(
        LogLevel::Debug,
        "Request: [GET] https://api.example.com/item".to_string()
    )));
}

#[tokio::test]
async fn not_found_is_invalid_status_code_with_body() {
    let client = client(MockTransport::new().respond("/item", 404, r#"{"message":"gone"}"#));

    let err = client
        .request_uncancellable::<Item>(&descriptor("/item"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidStatusCode {
            code: 404,
            body: br#"{"message":"gone"}"#.to_vec(),
        }
    );
    assert_eq!(
        err.to_string(),
        "The status code returned by the server indicates an error."
    );

    let lines = client.logger().lines();
    assert!(lines.contains(&(
        LogLevel::Error,
        r#"Failure Reason: The server returned an invalid status code: 404. Response data: {"message":"gone"}"#
            .to_string()
    )));
}

#[tokio::test]
async fn missing_keys_are_decoding_failures() {
    let client = client(MockTransport::new().respond("/item", 200, r#"{"invalid_field":"Test"}"#));

    let err = client
        .request_uncancellable::<Item>(&descriptor("/item"))
        .await
        .unwrap_err();
    match err {
        Error::DecodingFailure { reason, path } => {
            assert_eq!(path, "id");
            assert!(reason.starts_with("Key 'id' not found"), "{}", reason);
        }
        other => panic!("expected decoding failure, got {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_is_surfaced_unchanged() {
    let client = client(MockTransport::new().fail("/item", TransportError::Unknown));

    let err = client
        .request_uncancellable::<Item>(&descriptor("/item"))
        .await
        .unwrap_err();
    assert_eq!(err, Error::Transport(TransportError::Unknown));

    let records = client.logger().records();
    assert_eq!(
        records.last(),
        Some(&LogRecord::Error {
            description: "An unknown error occurred".to_string(),
            failure_reason: None,
        })
    );
    assert!(!records.iter().any(|r| matches!(r, LogRecord::Response { .. })));
}

#[tokio::test]
async fn transport_failure_logs_its_detail_as_failure_reason() {
    let client = client(
        MockTransport::new().fail("/item", TransportError::Connect("connection refused".into())),
    );

    let err = client
        .request_uncancellable::<Item>(&descriptor("/item"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        Error::Transport(TransportError::Connect("connection refused".into()))
    );

    let lines = client.logger().lines();
    let errors: Vec<&str> = lines
        .iter()
        .filter(|(level, _)| *level == LogLevel::Error)
        .map(|(_, line)| line.as_str())
        .collect();
    assert_eq!(
        errors,
        vec![
            "Response Error: Could not connect to the server.",
            "Failure Reason: connection refused",
        ]
    );
    assert!(!lines.iter().any(|(_, l)| l.starts_with("Response Status Code")));
}

#[tokio::test]
async fn no_status_outside_2xx_is_ever_decoded() {
    // A body that would decode cleanly, so any success means the status was ignored.
    let body = r#"{"id":1,"name":"x"}"#;
    for code in (100..200).chain(300..600) {
        let client = client(MockTransport::new().respond("/item", code, body));
        let err = client
            .request_uncancellable::<Item>(&descriptor("/item"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(code), "status {}", code);
        assert!(matches!(err, Error::InvalidStatusCode { ref body, .. } if body == br#"{"id":1,"name":"x"}"#));
    }
}

#[tokio::test]
async fn every_2xx_status_decodes() {
    for code in 200..300 {
        let client = client(MockTransport::new().respond("/item", code, r#"{"id":3,"name":"y"}"#));
        let item: Item = client
            .request_uncancellable(&descriptor("/item"))
            .await
            .unwrap();
        assert_eq!(item.id, 3);
    }
}

#[tokio::test]
async fn non_http_status_is_invalid_response_shape() {
    for code in [0u16, 42, 600, 999] {
        let client = client(MockTransport::new().respond("/item", code, "{}"));
        let err = client
            .request_uncancellable::<Item>(&descriptor("/item"))
            .await
            .unwrap_err();
        assert_eq!(err, Error::InvalidResponseShape);
    }
}

#[tokio::test]
async fn one_request_and_one_outcome_entry_per_call() {
    let transport = MockTransport::new()
        .respond("/ok", 200, r#"{"id":1,"name":"a"}"#)
        .respond("/bad", 500, "boom")
        .respond("/garbled", 200, "{")
        .fail("/down", TransportError::Connect("connection refused".into()));

    for path in ["/ok", "/bad", "/garbled", "/down"] {
        let client = NetworkClient::new(&transport, RecordingLogger::default());
        let _ = client.request_uncancellable::<Item>(&descriptor(path)).await;

        let logger = client.logger();
        assert_eq!(logger.count_requests(), 1, "{}", path);
        let outcome = match path {
            "/ok" => 0,
            _ => 1,
        };
        assert_eq!(logger.count_errors(), outcome, "{}", path);
        assert!(matches!(logger.records()[0], LogRecord::Request { .. }));
    }
}

#[tokio::test]
async fn concurrent_calls_keep_their_own_results() {
    let transport = MockTransport::new()
        .respond("/a", 200, r#"{"id":1,"name":"alpha"}"#)
        .respond("/b", 200, r#"{"id":2,"name":"beta"}"#)
        .respond("/c", 503, "unavailable")
        .delay("/a", Duration::from_millis(30))
        .delay("/c", Duration::from_millis(10));
    let client = Arc::new(NetworkClient::new(transport, RecordingLogger::default()));

    let mut handles = Vec::new();
    for path in ["/a", "/b", "/c", "/a", "/b"] {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            let res = client
                .request::<Item>(&descriptor(path), &CancellationToken::new())
                .await;
            (path, res)
        }));
    }

    for handle in handles {
        let (path, res) = handle.await.unwrap();
        match path {
            "/a" => assert_eq!(res.unwrap().name, "alpha"),
            "/b" => assert_eq!(res.unwrap().name, "beta"),
            _ => assert_eq!(res.unwrap_err().status_code(), Some(503)),
        }
    }
    assert_eq!(client.transport().calls(), 5);
    assert_eq!(client.logger().count_requests(), 5);
}

#[tokio::test]
async fn cancelling_mid_flight_stops_before_validation() {
    let transport = MockTransport::new()
        .respond("/slow", 200, r#"{"id":1,"name":"late"}"#)
        .delay("/slow", Duration::from_secs(5));
    let client = client(transport);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = client
        .request::<Item>(&descriptor("/slow"), &cancel)
        .await
        .unwrap_err();
    assert_eq!(err, Error::Transport(TransportError::Cancelled));
    assert_eq!(client.transport().calls(), 1);
    assert!(!client
        .logger()
        .records()
        .iter()
        .any(|r| matches!(r, LogRecord::Response { .. })));
}

#[tokio::test]
async fn request_headers_and_body_are_logged() {
    let client = client(MockTransport::new().respond("/item", 200, r#"{"id":1,"name":"a"}"#));
    let req = RequestDescriptor::new(reqwest::Method::POST, "https://api.example.com/item")
        .unwrap()
        .with_header("Accept", "application/json")
        .with_body(r#"{"q":1}"#);

    let _: Item = client.request_uncancellable(&req).await.unwrap();
    let lines: Vec<String> = client.logger().lines().into_iter().map(|(_, l)| l).collect();
    assert_eq!(lines[0], "Request: [POST] https://api.example.com/item");
    assert_eq!(lines[1], r#"Request Headers: {"accept": "application/json"}"#);
    assert_eq!(lines[2], r#"Request Body: {"q":1}"#);
}

#[test]
fn unparseable_url_never_reaches_a_transport() {
    let err = RequestDescriptor::get("not a url").unwrap_err();
    assert_eq!(err, Error::InvalidUrl("not a url".to_string()));
}
