//! Integration tests for dataset loading.
//!
//! HTTP tests run against a throwaway server on a loopback port, so no
//! external network access is needed.

use std::time::Duration;

use paperdeck_core::{DataSource, LoadError, load};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const DATASET: &str = r#"{
  "papers": [
    {"id": "1", "title": "A", "summary": "x", "link": "https://example.org/a",
     "published": "2024-01-01T00:00:00Z", "matched_keywords": ["ml"]},
    {"id": "2", "title": "B", "summary": "y", "link": "https://example.org/b",
     "published": "2024-06-01T00:00:00Z", "authors": ["Ada", "Grace"],
     "matched_keywords": ["nlp", "ml"], "source": "arXiv"}
  ]
}"#;

/// Serve a single canned HTTP response, returning the URL to request.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/data/papers.json")
}

#[tokio::test]
async fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("papers.json");
    std::fs::write(&path, DATASET).unwrap();

    let papers = load(&DataSource::File(path), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[1].authors, ["Ada", "Grace"]);
    assert_eq!(papers[1].source.as_deref(), Some("arXiv"));
    assert!(papers[0].authors.is_empty());
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DataSource::File(dir.path().join("nope.json"));
    let err = load(&source, Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[tokio::test]
async fn malformed_file_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("papers.json");
    std::fs::write(&path, "[{\"title\": ").unwrap();
    let err = load(&DataSource::File(path), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[tokio::test]
async fn loads_over_http() {
    let url = serve_once("200 OK", DATASET).await;
    let papers = load(&DataSource::parse(&url), Duration::from_secs(5))
        .await
        .unwrap();
    let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);
}

#[tokio::test]
async fn http_error_status_is_surfaced() {
    let url = serve_once("404 Not Found", "{}").await;
    let err = load(&DataSource::parse(&url), Duration::from_secs(5))
        .await
        .unwrap_err();
    match err {
        LoadError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_layout_over_http_is_shape_error() {
    let url = serve_once("200 OK", r#"{"items": []}"#).await;
    let err = load(&DataSource::parse(&url), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Shape(_)));
}

#[tokio::test]
async fn unresponsive_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        // Hold the connection open without answering.
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let source = DataSource::Url(format!("http://{addr}/papers.json"));
    let err = load(&source, Duration::from_millis(200)).await.unwrap_err();
    assert!(matches!(err, LoadError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_http_error() {
    // Bind then drop to find a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = DataSource::Url(format!("http://{addr}/papers.json"));
    let err = load(&source, Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, LoadError::Http(_)), "got {err:?}");
}
