//! End-to-end client behavior against a local `tiny_http` backend.

use std::io::Read;
use std::thread::JoinHandle;
use std::time::Duration;

use bilancio_client::{AnalysisClient, ClientError, Upload};
use bilancio_config::ApiConfig;
use bilancio_core::{AnalysisResponse, MatchingType};
use pretty_assertions::assert_eq;

const SUCCESS_BODY: &str = r#"{
    "raw_data": [
        {"Voce": "Totale Attivo", "2022": 150000.0, "2023": 162000.0},
        {"Voce": "Utile Netto", "2022": 9000.0, "2023": null}
    ],
    "standardized_data": [
        {"Voce Standard": "Totale Attivo", "Score": 100},
        {"Voce Standard": "Utile Netto", "Score": 92}
    ],
    "financial_indices": {
        "2022": {"ROE": 7.5, "ROI": 6.0},
        "2023": {"ROE": null, "ROI": 5.1}
    }
}"#;

/// What the mock backend saw.
struct Captured {
    method: String,
    url: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

struct MockBackend {
    base_url: String,
    handle: JoinHandle<Option<Captured>>,
}

impl MockBackend {
    /// Answer the first request with `status` and `body`.
    fn respond_with(status: u16, body: &'static str) -> Self {
        Self::spawn(Duration::from_secs(10), move |request| {
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                );
            let _ = request.respond(response);
        })
    }

    /// Accept the first request and never answer it within `hold`.
    fn stall(hold: Duration) -> Self {
        Self::spawn(Duration::from_secs(10), move |request| {
            std::thread::sleep(hold);
            drop(request);
        })
    }

    /// Wait up to `wait` for a request that should never arrive.
    fn expect_silence(wait: Duration) -> Self {
        Self::spawn(wait, |request| {
            let _ = request.respond(tiny_http::Response::empty(500));
        })
    }

    fn spawn<F>(wait: Duration, reply: F) -> Self
    where
        F: FnOnce(tiny_http::Request) + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("mock server should bind");
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("mock server has a TCP port");

        let handle = std::thread::spawn(move || {
            let mut request = server.recv_timeout(wait).ok()??;
            let mut body = Vec::new();
            let _ = request.as_reader().read_to_end(&mut body);
            let captured = Captured {
                method: request.method().to_string(),
                url: request.url().to_string(),
                content_type: request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("Content-Type"))
                    .map(|header| header.value.as_str().to_string()),
                body,
            };
            reply(request);
            Some(captured)
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            handle,
        }
    }

    fn client(&self) -> AnalysisClient {
        self.client_with_timeout(30)
    }

    fn client_with_timeout(&self, timeout_secs: u64) -> AnalysisClient {
        AnalysisClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs,
            ..Default::default()
        })
        .expect("client should build")
    }

    fn captured(self) -> Option<Captured> {
        self.handle.join().expect("mock thread should not panic")
    }
}

fn workbook() -> Upload {
    Upload::new("bilancio_2023.xlsx", b"PK\x03\x04fake-workbook".to_vec())
}

#[tokio::test]
async fn success_returns_body_unmodified() {
    let backend = MockBackend::respond_with(200, SUCCESS_BODY);
    let response = backend
        .client()
        .submit_analysis(workbook(), MatchingType::Fuzzy)
        .await
        .expect("analysis should succeed");

    let expected: AnalysisResponse = serde_json::from_str(SUCCESS_BODY).unwrap();
    assert_eq!(response, expected);

    let as_json = serde_json::to_value(&response).unwrap();
    let original: serde_json::Value = serde_json::from_str(SUCCESS_BODY).unwrap();
    assert_eq!(as_json, original);
    backend.captured().expect("backend saw the request");
}

#[tokio::test]
async fn request_is_multipart_post_to_analyze_path() {
    let backend = MockBackend::respond_with(200, SUCCESS_BODY);
    backend
        .client()
        .submit_analysis(workbook(), MatchingType::Gpt)
        .await
        .expect("analysis should succeed");

    let captured = backend.captured().expect("backend saw the request");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/api/v1/analyze");
    assert!(
        captured
            .content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("multipart/form-data; boundary="))
    );

    let body = String::from_utf8_lossy(&captured.body);
    assert!(body.contains("name=\"file\"; filename=\"bilancio_2023.xlsx\""));
    assert!(body.contains("PK\u{3}\u{4}fake-workbook"));
    assert!(body.contains("name=\"matching_type\"\r\n\r\ngpt\r\n"));
}

#[tokio::test]
async fn server_error_surfaces_status_and_detail() {
    let backend = MockBackend::respond_with(
        500,
        r#"{"detail": "Errore durante l'analisi del bilancio: foglio vuoto"}"#,
    );
    let err = backend
        .client()
        .submit_analysis(workbook(), MatchingType::Embedding)
        .await
        .expect_err("500 must not produce a value");

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("foglio vuoto"));
    backend.captured().expect("backend saw the request");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let backend = MockBackend::respond_with(200, r#"{"raw_data": "not a list"}"#);
    let err = backend
        .client()
        .submit_analysis(workbook(), MatchingType::Fuzzy)
        .await
        .expect_err("malformed body must fail");

    assert!(matches!(err, ClientError::Decode(_)));
    backend.captured().expect("backend saw the request");
}

#[tokio::test]
async fn invalid_matching_type_never_reaches_the_network() {
    let backend = MockBackend::expect_silence(Duration::from_millis(500));
    let err = backend
        .client()
        .submit_analysis_str(workbook(), "levenshtein")
        .await
        .expect_err("unknown strategy must be rejected");

    assert!(matches!(err, ClientError::Contract(_)));
    assert!(backend.captured().is_none(), "no request may be sent");
}

#[tokio::test]
async fn slow_backend_hits_the_timeout() {
    let backend = MockBackend::stall(Duration::from_secs(3));
    let err = backend
        .client_with_timeout(1)
        .submit_analysis(workbook(), MatchingType::Fuzzy)
        .await
        .expect_err("request should time out");

    assert!(matches!(err, ClientError::Timeout { secs: 1 }));
    backend.captured().expect("backend saw the request");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = AnalysisClient::new(&ApiConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap();

    let err = client
        .submit_analysis(workbook(), MatchingType::Fuzzy)
        .await
        .expect_err("closed port must fail");
    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.status(), None);
}
