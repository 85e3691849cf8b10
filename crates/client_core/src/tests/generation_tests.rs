use super::*;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct ServerState {
    reply: Result<&'static str, StatusCode>,
    tx: Arc<Mutex<Option<oneshot::Sender<GenerateRequest>>>>,
}

async fn handle_generate(
    State(state): State<ServerState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, StatusCode> {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(payload);
    }
    state.reply.map(|url| {
        Json(GenerateResponse {
            images: url.to_string(),
        })
    })
}

async fn spawn_generation_server(
    reply: Result<&'static str, StatusCode>,
) -> (String, oneshot::Receiver<GenerateRequest>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        reply,
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/api/generate", post(handle_generate))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn posts_prompt_and_returns_image_url() {
    let (api_url, request_rx) = spawn_generation_server(Ok("http://x/cat.png")).await;
    let client = HttpGenerationClient::new(api_url);

    let url = client.generate("a red cat").await.expect("generate");

    assert_eq!(url, "http://x/cat.png");
    let request = request_rx.await.expect("request");
    assert_eq!(request.prompt, "a red cat");
}

#[tokio::test]
async fn non_success_status_is_reported_as_status_error() {
    let (api_url, _request_rx) =
        spawn_generation_server(Err(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let client = HttpGenerationClient::new(api_url);

    let err = client.generate("a red cat").await.expect_err("must fail");

    assert!(matches!(err, ClientError::Status { status: 500 }), "{err}");
}

#[tokio::test]
async fn unreachable_endpoint_is_reported_as_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpGenerationClient::new(format!("http://{addr}"));
    let err = client.generate("a red cat").await.expect_err("must fail");

    assert!(matches!(err, ClientError::Transport(_)), "{err}");
}

#[tokio::test]
async fn undecodable_body_is_reported_as_invalid_response() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/api/generate",
        post(|| async { Json(serde_json::json!({ "image": 42 })) }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = HttpGenerationClient::new(format!("http://{addr}"));
    let err = client.generate("a red cat").await.expect_err("must fail");
    assert!(matches!(err, ClientError::InvalidResponse(_)), "{err}");
}

#[test]
fn endpoint_joins_base_url_without_double_slash() {
    let client = HttpGenerationClient::new("http://localhost:5000/");
    assert_eq!(client.endpoint(), "http://localhost:5000/api/generate");
}
