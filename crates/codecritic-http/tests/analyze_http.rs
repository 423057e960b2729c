use axum::{Json, Router, http::StatusCode, http::HeaderMap, response::IntoResponse, routing::post};
use codecritic_core::{
    AnalysisResult, AnalysisService, AnalyzeRequestHandler, CodeSubmission, Error, FailureKind,
    Notifier, Outcome, ResultView,
};
use codecritic_http::{AnalyzeClient, ApiConfig};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingView {
    suggestion: Mutex<String>,
    rating: Mutex<String>,
}

impl ResultView for RecordingView {
    fn set_suggestion(&self, text: &str) {
        *self.suggestion.lock().unwrap() = text.to_string();
    }

    fn set_rating(&self, text: &str) {
        *self.rating.lock().unwrap() = text.to_string();
    }
}

struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn alert(&self, _message: &str) {}
}

/// Requests the mock analyzer has seen: (content type, body).
type Seen = Arc<Mutex<Vec<(String, Value)>>>;

async fn spawn_mock_analyzer(status: StatusCode, reply: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let recorder = seen.clone();

    let app = Router::new().route(
        "/analyze",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                recorder.lock().unwrap().push((content_type, body));
                (status, reply).into_response()
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

/// Mock analyzer that holds every request for `delay` before replying.
async fn spawn_stalled_analyzer(delay: Duration) -> String {
    let app = Router::new().route(
        "/analyze",
        post(move || async move {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, r#"{"suggestion":"too late","rating":"0/10"}"#)
        }),
    );

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> AnalyzeClient {
    AnalyzeClient::new(ApiConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn posts_trimmed_code_as_json() {
    let (base_url, seen) = spawn_mock_analyzer(
        StatusCode::OK,
        r#"{"suggestion":"Use a list comprehension","rating":"7/10"}"#,
    )
    .await;
    let client = client_for(&base_url);

    let submission = CodeSubmission::new("  squares = []\n").unwrap();
    let result = client.analyze(&submission).await.unwrap();

    assert_eq!(
        result,
        AnalysisResult {
            suggestion: "Use a list comprehension".to_string(),
            rating: "7/10".to_string(),
        }
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "application/json");
    assert_eq!(seen[0].1, json!({ "code": "squares = []" }));
}

#[tokio::test]
async fn rejection_detail_is_reported() {
    let (base_url, _seen) =
        spawn_mock_analyzer(StatusCode::BAD_REQUEST, r#"{"detail":"Invalid syntax"}"#).await;

    let err = client_for(&base_url)
        .analyze(&CodeSubmission::new("def (").unwrap())
        .await
        .unwrap_err();

    match err {
        Error::Server { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail.as_deref(), Some("Invalid syntax"));
        }
        other => panic!("expected server rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn success_without_rating_is_a_decode_failure() {
    let (base_url, _seen) =
        spawn_mock_analyzer(StatusCode::OK, r#"{"suggestion":"only half"}"#).await;

    let err = client_for(&base_url)
        .analyze(&CodeSubmission::new("x = 1").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn handler_renders_success() {
    let (base_url, _seen) = spawn_mock_analyzer(
        StatusCode::OK,
        r#"{"suggestion":"Use a list comprehension","rating":"7/10"}"#,
    )
    .await;
    let view = Arc::new(RecordingView::default());
    let handler = AnalyzeRequestHandler::new(client_for(&base_url), view.clone(), SilentNotifier);

    let outcome = handler.handle("squares = [x * x for x in range(3)]").await;

    assert!(outcome.is_analyzed());
    assert_eq!(*view.suggestion.lock().unwrap(), "Use a list comprehension");
    assert_eq!(*view.rating.lock().unwrap(), "7/10");
}

#[tokio::test]
async fn handler_renders_rejection_with_empty_body() {
    let (base_url, _seen) = spawn_mock_analyzer(StatusCode::INTERNAL_SERVER_ERROR, "").await;
    let view = Arc::new(RecordingView::default());
    view.set_rating("8/10");
    let handler = AnalyzeRequestHandler::new(client_for(&base_url), view.clone(), SilentNotifier);

    let outcome = handler.handle("x = 1").await;

    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(*view.suggestion.lock().unwrap(), "An error occurred.");
    assert_eq!(*view.rating.lock().unwrap(), "");
}

#[tokio::test]
async fn handler_renders_unreachable_analyzer() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let view = Arc::new(RecordingView::default());
    let handler = AnalyzeRequestHandler::new(
        client_for(&format!("http://{}", addr)),
        view.clone(),
        SilentNotifier,
    );

    handler.handle("x = 1").await;

    let suggestion = view.suggestion.lock().unwrap().clone();
    assert!(
        suggestion.starts_with("Network or server error: "),
        "unexpected suggestion: {suggestion}"
    );
    assert!(suggestion.len() > "Network or server error: ".len());
    assert_eq!(*view.rating.lock().unwrap(), "");
}

#[tokio::test]
async fn sub_second_timeout_allows_prompt_reply() {
    let (base_url, _seen) = spawn_mock_analyzer(
        StatusCode::OK,
        r#"{"suggestion":"Use a list comprehension","rating":"7/10"}"#,
    )
    .await;
    let config = ApiConfig::new(base_url).with_timeout(Duration::from_millis(500));
    let client = AnalyzeClient::new(config).unwrap();

    let result = client
        .analyze(&CodeSubmission::new("x = 1").unwrap())
        .await
        .unwrap();

    assert_eq!(result.rating, "7/10");
}

#[tokio::test]
async fn stalled_analyzer_times_out_as_transport_failure() {
    let base_url = spawn_stalled_analyzer(Duration::from_secs(10)).await;
    let config = ApiConfig::new(base_url).with_timeout(Duration::from_millis(200));
    let view = Arc::new(RecordingView::default());
    view.set_rating("7/10");
    let handler =
        AnalyzeRequestHandler::new(AnalyzeClient::new(config).unwrap(), view.clone(), SilentNotifier);

    let outcome = handler.handle("x = 1").await;

    match outcome {
        Outcome::Failed(report) => {
            assert_eq!(report.kind, FailureKind::TransportFailure);
            assert!(
                report.detail.starts_with("Network or server error: "),
                "unexpected detail: {}",
                report.detail
            );
        }
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert_eq!(*view.rating.lock().unwrap(), "");
}
