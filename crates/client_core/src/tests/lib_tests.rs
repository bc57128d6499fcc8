use super::*;
use crate::reference::{load_examples, load_syllabary};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    received: Arc<Mutex<Vec<Value>>>,
}

async fn handle_transcribe(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.received.lock().await.push(body.clone());
    match body["text"].as_str() {
        Some("") | None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No text provided" })),
        ),
        Some("𐀀𐀫") => (
            StatusCode::OK,
            Json(json!({ "success": true, "transliteration": "a-ro", "phonetic": "aro" })),
        ),
        Some(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "unrecognized sign" })),
        ),
    }
}

async fn handle_analyze(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.received.lock().await.push(body.clone());
    if body["word"] == "wa-na-ka" {
        Json(json!({
            "success": true,
            "analysis": {
                "transliteration": "wa-na-ka",
                "meaning": "king, lord",
                "classical_greek": "ἄναξ",
                "reconstruction": "wanaks"
            },
            "comparison": {
                "mycenaean": "wanaks",
                "classical": "ἄναξ",
                "changes": [
                    { "type": "Loss of digamma", "description": "Initial w- lost: wanaks → ἄναξ" }
                ]
            }
        }))
    } else {
        Json(json!({ "success": false, "message": "Word not found in lexicon" }))
    }
}

async fn handle_examples() -> Json<Value> {
    Json(json!([
        { "name": "wa-na-ka (King)", "linear_b": "𐀷𐀙𐀏", "description": "king" },
        { "name": "te-o (God)", "linear_b": "𐀳𐀀", "description": "god" }
    ]))
}

async fn handle_syllabary() -> Json<Value> {
    Json(json!([
        { "sign": "𐀷", "transliteration": "wa", "phonetic": "wa", "unicode": "U+10037" },
        { "sign": "𐀀", "transliteration": "a", "phonetic": "a", "unicode": "U+10000" },
        { "sign": "𐀙", "transliteration": "na", "phonetic": "na", "unicode": "U+10019" }
    ]))
}

async fn spawn_decoder_server(prefix: Option<&str>) -> anyhow::Result<(String, ServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let api = Router::new()
        .route("/api/transcribe", post(handle_transcribe))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/examples", get(handle_examples))
        .route("/api/syllabary", get(handle_syllabary))
        .with_state(state.clone());
    let (app, base) = match prefix {
        Some(prefix) => (
            Router::new().nest(prefix, api),
            format!("http://{addr}{prefix}"),
        ),
        None => (api, format!("http://{addr}")),
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((base, state))
}

async fn spawn_broken_server() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/transcribe", post(|| async { "<html>oops</html>" }))
        .route(
            "/api/syllabary",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/examples", get(|| async { Json(json!([])) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn client(base: &str) -> HttpDecoderClient {
    HttpDecoderClient::new(base, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn transcribe_posts_text_and_parses_result() -> anyhow::Result<()> {
    let (base, state) = spawn_decoder_server(None).await?;
    let result = client(&base).transcribe("𐀀𐀫").await?;

    assert!(result.success);
    assert_eq!(result.transliteration.as_deref(), Some("a-ro"));
    assert_eq!(result.phonetic.as_deref(), Some("aro"));
    assert_eq!(*state.received.lock().await, vec![json!({ "text": "𐀀𐀫" })]);
    Ok(())
}

#[tokio::test]
async fn error_status_body_is_read_as_rejection() -> anyhow::Result<()> {
    let (base, _) = spawn_decoder_server(None).await?;
    let result = client(&base).transcribe("𐀀?").await?;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("unrecognized sign"));
    Ok(())
}

#[tokio::test]
async fn analyze_parses_optional_sections() -> anyhow::Result<()> {
    let (base, state) = spawn_decoder_server(None).await?;
    let api = client(&base);

    let found = api.analyze("wa-na-ka").await?;
    let view = AnalysisView::from_result(&found);
    assert_eq!(view.lines().len(), 4);
    assert_eq!(
        view.lines()[0],
        AnalysisLine::Meaning("king, lord".to_string())
    );

    let missing = api.analyze("ku-ru-so").await?;
    assert!(!missing.success);
    assert_eq!(AnalysisView::from_result(&missing), AnalysisView::Hidden);
    assert_eq!(
        state.received.lock().await.last(),
        Some(&json!({ "word": "ku-ru-so" }))
    );
    Ok(())
}

#[tokio::test]
async fn reference_lists_load_in_expected_order() -> anyhow::Result<()> {
    let (base, _) = spawn_decoder_server(None).await?;
    let api = client(&base);

    let examples = load_examples(&api).await?;
    let names: Vec<_> = examples.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["wa-na-ka (King)", "te-o (God)"]);

    let signs = load_syllabary(&api).await?;
    let order: Vec<_> = signs.iter().map(|s| s.transliteration.as_str()).collect();
    assert_eq!(order, vec!["a", "na", "wa"]);
    Ok(())
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() -> anyhow::Result<()> {
    let (base, _) = spawn_decoder_server(Some("/decoder")).await?;
    let api = client(&base);
    assert!(api.base_url().as_str().ends_with("/decoder/"));

    let signs = api.syllabary().await?;
    assert_eq!(signs.len(), 3);
    Ok(())
}

#[tokio::test]
async fn full_round_trip_through_orchestrator() -> anyhow::Result<()> {
    let (base, state) = spawn_decoder_server(None).await?;
    let api = client(&base);

    let mut steps = Vec::new();
    transcribe_and_analyze(&api, "𐀀𐀫", |step| steps.push(step)).await;

    assert_eq!(steps.len(), 2);
    assert!(matches!(
        &steps[1],
        DecodeStep::Analyzed { word, view } if word == "a-ro" && !view.is_visible()
    ));
    assert_eq!(state.received.lock().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_reported() -> anyhow::Result<()> {
    let base = spawn_broken_server().await?;
    let err = client(&base)
        .transcribe("𐀀")
        .await
        .expect_err("html is not json");
    assert!(matches!(
        err,
        ClientError::Malformed {
            endpoint: "transcribe",
            ..
        }
    ));
    Ok(())
}

#[tokio::test]
async fn collection_failures_are_typed() -> anyhow::Result<()> {
    let base = spawn_broken_server().await?;
    let api = client(&base);

    let err = load_syllabary(&api).await.expect_err("500");
    assert!(matches!(
        err,
        ClientError::Status {
            endpoint: "syllabary",
            status: 500
        }
    ));

    let err = load_examples(&api).await.expect_err("empty");
    assert!(matches!(
        err,
        ClientError::EmptyCollection {
            endpoint: "examples"
        }
    ));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .examples()
        .await
        .expect_err("connection refused");
    assert!(matches!(err, ClientError::Transport { .. }));
}

#[test]
fn invalid_server_url_is_rejected() {
    let err = HttpDecoderClient::new("not a url", Duration::from_secs(1)).expect_err("invalid");
    assert!(matches!(err, ClientError::InvalidServerUrl { .. }));
}
