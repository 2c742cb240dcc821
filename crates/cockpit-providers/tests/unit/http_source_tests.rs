//! Tests for the HTTP data source against a one-shot local server

use cockpit_domain::error::Error;
use cockpit_domain::ports::MetricDataSource;
use cockpit_domain::{DatabaseId, FetchParams, FetchRequest, HistoricRange, Metric, SamplePoint};
use cockpit_providers::data_source::HttpMetricDataSource;
use cockpit_providers::http::{HttpClientConfig, build_client};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// ============================================================================
// Test Helpers
// ============================================================================

/// Serve one response and hand back the request line that was received
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let root = format!("http://{}/monitor/", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 1024];
        while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let request = String::from_utf8_lossy(&buffer).to_string();
        request.lines().next().unwrap_or_default().to_string()
    });
    (root, handle)
}

fn source() -> HttpMetricDataSource {
    let config = HttpClientConfig::with_timeout(Duration::from_secs(5));
    HttpMetricDataSource::new(build_client(&config).unwrap(), config.timeout)
}

// ============================================================================
// Snapshot Requests
// ============================================================================

#[tokio::test]
async fn test_snapshot_fetch_reads_envelope() {
    let body = serde_json::json!({
        "header": {"timestamp": 1, "message": null},
        "body": {"throughput": {"alpha": 1200, "beta": 30}}
    })
    .to_string();
    let (root, server) = serve_once("200 OK", body).await;

    let request = FetchRequest::new(
        Metric::Throughput,
        format!("{root}throughput"),
        DatabaseId::new("alpha"),
        None,
    );
    let sample = source().fetch(&request).await.unwrap();

    assert_eq!(sample.points, vec![SamplePoint::value(1200.0)]);
    assert_eq!(server.await.unwrap(), "GET /monitor/throughput HTTP/1.1");
}

#[tokio::test]
async fn test_server_error_is_data_source_error() {
    let (root, server) = serve_once("500 Internal Server Error", "{}".to_string()).await;

    let request = FetchRequest::new(
        Metric::Latency,
        format!("{root}latency"),
        DatabaseId::new("alpha"),
        None,
    );
    let err = source().fetch(&request).await.unwrap_err();

    assert!(matches!(err, Error::DataSource { .. }));
    assert!(err.to_string().contains("500"));
    server.await.unwrap();
}

// ============================================================================
// Historic Requests
// ============================================================================

#[tokio::test]
async fn test_historic_fetch_sends_window_and_reads_list() {
    let body = serde_json::json!([
        {"id": "alpha", "storage": [
            {"timestamp": 10, "storage": 100},
            {"timestamp": 20, "storage": 300}
        ]}
    ])
    .to_string();
    let (root, server) = serve_once("200 OK", body).await;

    let params = FetchParams::new(HistoricRange::new(0, 60), Duration::from_nanos(1));
    let request = FetchRequest::new(
        Metric::Storage,
        format!("{root}storage"),
        DatabaseId::new("alpha"),
        Some(params),
    );
    let sample = source().fetch(&request).await.unwrap();

    assert_eq!(
        sample.points,
        vec![SamplePoint::at(10, 100.0), SamplePoint::at(20, 300.0)]
    );
    assert_eq!(
        server.await.unwrap(),
        "GET /monitor/storage?startts=0&endts=60&precision=1 HTTP/1.1"
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_data_source_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = FetchRequest::new(
        Metric::Cpu,
        format!("http://{addr}/monitor/system_data"),
        DatabaseId::new("alpha"),
        None,
    );
    let err = source().fetch(&request).await.unwrap_err();
    assert!(err.is_fetch_failure());
}
