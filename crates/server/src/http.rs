//! HTTP Endpoints
//!
//! REST API for the loan advisor: free-form chat, conversation
//! summarization, and guided application sessions.

use axum::{
    body::Bytes,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use loan_advisor_core::{ChatMessage, ChatSummary, Language};

use crate::session::Session;
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Free-form advisor chat
        .route("/api/chat", post(chat))
        .route("/api/summarize", post(summarize))
        // Guided application sessions
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}", delete(delete_session))
        .route("/api/sessions/{id}/message", post(session_message))
        .route("/api/sessions/{id}/audio", post(session_audio))
        // Health check
        .route("/health", get(health_check))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if state.config.server.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}

fn error_body(message: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": message }))
}

/// Chat request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    user_id: Option<String>,
    message: Option<String>,
    language_code: Option<String>,
}

/// Chat response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    response: String,
    language_code: String,
}

/// Free-form advisor chat
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    let (user_id, message, language_code) = match (
        request.user_id.filter(|s| !s.is_empty()),
        request.message.filter(|s| !s.is_empty()),
        request.language_code.filter(|s| !s.is_empty()),
    ) {
        (Some(u), Some(m), Some(l)) => (u, m, l),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                error_body("User ID, message, and language code are required"),
            ));
        }
    };

    let language = match language_code.parse::<Language>() {
        Ok(language) => language,
        Err(_) => {
            return Err((
                StatusCode::BAD_REQUEST,
                error_body("Unsupported language code"),
            ));
        }
    };

    let history = state.chat_history.recent(&user_id);

    match state.advisor.respond(&history, &message, language).await {
        Ok(response) => {
            state.chat_history.record(&user_id, &message, &response);
            Ok(Json(ChatResponse {
                response,
                language_code,
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "chat completion failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("An error occurred while processing your request"),
            ))
        }
    }
}

/// Summarize request
#[derive(Debug, Deserialize)]
struct SummarizeRequest {
    messages: Vec<ChatMessage>,
}

/// Summarize response
#[derive(Debug, Serialize)]
struct SummarizeResponse {
    summary: ChatSummary,
}

/// Summarize a chat transcript
async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, (StatusCode, Json<serde_json::Value>)> {
    match state.summarizer.summarize(&request.messages).await {
        Ok(summary) => Ok(Json(SummarizeResponse { summary })),
        Err(e) => {
            tracing::error!(error = %e, "summarization failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to generate summary"),
            ))
        }
    }
}

/// Session creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    language_code: Option<String>,
}

/// Session creation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionResponse {
    session_id: String,
    language_code: String,
    greeting: String,
}

/// Open a guided application session
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let language = match request.language_code {
        Some(code) => match code.parse::<Language>() {
            Ok(language) => language,
            Err(_) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    error_body("Unsupported language code"),
                ));
            }
        },
        None => Language::default(),
    };

    let session = state.sessions.create(language).map_err(|e| {
        tracing::error!(error = %e, "session creation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_body("Could not create session"),
        )
    })?;

    let greeting = state.controller.greeting(language).await;

    Ok(Json(CreateSessionResponse {
        session_id: session.id.clone(),
        language_code: language.code().to_string(),
        greeting,
    }))
}

/// Session message request
#[derive(Debug, Deserialize)]
struct SessionMessageRequest {
    message: Option<String>,
}

/// Session message response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionMessageResponse {
    response: String,
    step: Option<usize>,
    loan_type: Option<String>,
    /// Synthesized reply audio, base64 WAV clips in playback order
    audio: Vec<String>,
}

/// Spoken when an uploaded utterance yields no usable transcript
const RETRY_PROMPT: &str =
    "I'm sorry, I couldn't hear you clearly. Could you please try again?";

/// Advance a guided session by one user message
async fn session_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SessionMessageRequest>,
) -> Result<Json<SessionMessageResponse>, (StatusCode, Json<serde_json::Value>)> {
    let Some(message) = request.message.filter(|s| !s.is_empty()) else {
        return Err((StatusCode::BAD_REQUEST, error_body("Message is required")));
    };

    let session = state
        .sessions
        .get(&id)
        .ok_or((StatusCode::NOT_FOUND, error_body("Session not found")))?;

    Ok(Json(advance_session(&state, &session, &message).await))
}

/// Advance a guided session by one recorded utterance (WAV body)
///
/// Transcription is fail-open: a failed or empty transcript produces a
/// retry prompt instead of an error, and the conversation state is left
/// untouched.
async fn session_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SessionMessageResponse>, (StatusCode, Json<serde_json::Value>)> {
    let session = state
        .sessions
        .get(&id)
        .ok_or((StatusCode::NOT_FOUND, error_body("Session not found")))?;

    let transcript = match state.stt.transcribe(&body, session.language).await {
        Ok(transcript) if !transcript.is_empty() => transcript.text,
        Ok(_) => {
            return Ok(Json(retry_response(&state, &session).await));
        }
        Err(e) => {
            tracing::warn!(error = %e, "transcription failed, prompting retry");
            return Ok(Json(retry_response(&state, &session).await));
        }
    };

    Ok(Json(advance_session(&state, &session, &transcript).await))
}

async fn advance_session(
    state: &AppState,
    session: &Session,
    message: &str,
) -> SessionMessageResponse {
    session.touch();

    // One in-flight message per session: the state is cloned out while
    // the controller awaits its collaborators, then written back.
    let mut conversation = session.state.lock().clone();
    let reply = state
        .controller
        .handle_message(&mut conversation, message)
        .await;
    *session.state.lock() = conversation;

    let audio = synthesize_reply(state, &reply.text, session.language).await;

    SessionMessageResponse {
        response: reply.text,
        step: reply.step,
        loan_type: reply.loan_type.map(|lt| lt.id().to_string()),
        audio,
    }
}

async fn retry_response(state: &AppState, session: &Session) -> SessionMessageResponse {
    session.touch();
    let conversation = session.state.lock().clone();
    let audio = synthesize_reply(state, RETRY_PROMPT, session.language).await;

    SessionMessageResponse {
        response: RETRY_PROMPT.to_string(),
        step: conversation.display_step(),
        loan_type: conversation.loan_type.map(|lt| lt.id().to_string()),
        audio,
    }
}

/// Synthesize reply audio; TTS failure degrades to a silent reply
async fn synthesize_reply(state: &AppState, text: &str, language: Language) -> Vec<String> {
    match state.tts.synthesize(text, language).await {
        Ok(clips) => clips.iter().map(|clip| BASE64.encode(clip)).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "TTS synthesis failed, replying without audio");
            Vec::new()
        }
    }
}

/// Get session status
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let session = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let conversation = session.state.lock();

    Ok(Json(serde_json::json!({
        "sessionId": session.id,
        "languageCode": session.language.code(),
        "loanType": conversation.loan_type.map(|lt| lt.id()),
        "step": conversation.display_step(),
    })))
}

/// Delete session
async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.sessions.remove(&id);
    StatusCode::NO_CONTENT
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use loan_advisor_config::Settings;
    use loan_advisor_core::{
        AdvisorChat, Error, LoanClassifier, LoanType, Result, SpeechToText, Summarizer,
        TextToSpeech, Transcript, Translator, Turn, UnderstandingCheck,
    };
    use loan_advisor_guidance::GuidanceController;

    struct EchoAdvisor;

    #[async_trait]
    impl AdvisorChat for EchoAdvisor {
        async fn respond(
            &self,
            history: &[Turn],
            message: &str,
            _language: Language,
        ) -> Result<String> {
            Ok(format!("({}) re: {message}", history.len()))
        }
    }

    struct FailingAdvisor;

    #[async_trait]
    impl AdvisorChat for FailingAdvisor {
        async fn respond(&self, _: &[Turn], _: &str, _: Language) -> Result<String> {
            Err(Error::Llm("upstream down".to_string()))
        }
    }

    struct FixedSummarizer;

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _messages: &[ChatMessage]) -> Result<ChatSummary> {
            Ok(ChatSummary {
                summary: "talked about loans".to_string(),
                key_points: vec!["home loan".to_string()],
                flow: vec!["greeting".to_string()],
            })
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _messages: &[ChatMessage]) -> Result<ChatSummary> {
            Err(Error::Llm("upstream down".to_string()))
        }
    }

    struct HomeClassifier;

    #[async_trait]
    impl LoanClassifier for HomeClassifier {
        async fn classify(&self, message: &str, _language: Language) -> Result<Option<LoanType>> {
            Ok(message.contains("home").then_some(LoanType::Home))
        }
    }

    struct AlwaysUnderstood;

    #[async_trait]
    impl UnderstandingCheck for AlwaysUnderstood {
        async fn confirmed(&self, _: &str, _: Language) -> Result<bool> {
            Ok(true)
        }
    }

    struct IdentityTranslator;

    #[async_trait]
    impl Translator for IdentityTranslator {
        async fn translate(&self, text: &str, _target: Language) -> Result<String> {
            Ok(text.to_string())
        }
    }

    /// Transcribes every upload to the fixed text; `None` fails
    struct StubStt(Option<&'static str>);

    #[async_trait]
    impl SpeechToText for StubStt {
        async fn transcribe(&self, _audio: &[u8], language: Language) -> Result<Transcript> {
            match self.0 {
                Some(text) => Ok(Transcript::new(text).with_language(language)),
                None => Err(Error::Stt("upstream down".to_string())),
            }
        }
    }

    struct StubTts;

    #[async_trait]
    impl TextToSpeech for StubTts {
        async fn synthesize(&self, _text: &str, _language: Language) -> Result<Vec<Vec<u8>>> {
            Ok(vec![vec![1, 2, 3]])
        }
    }

    fn test_state(advisor: Arc<dyn AdvisorChat>, summarizer: Arc<dyn Summarizer>) -> AppState {
        test_state_with_stt(advisor, summarizer, StubStt(Some("I need a home loan")))
    }

    fn test_state_with_stt(
        advisor: Arc<dyn AdvisorChat>,
        summarizer: Arc<dyn Summarizer>,
        stt: StubStt,
    ) -> AppState {
        let controller = GuidanceController::new(
            Arc::new(HomeClassifier),
            Arc::new(AlwaysUnderstood),
            Arc::new(IdentityTranslator),
            10,
        );
        AppState::with_services(
            Settings::default(),
            controller,
            advisor,
            summarizer,
            Arc::new(stt),
            Arc::new(StubTts),
        )
    }

    fn app() -> Router {
        create_router(test_state(Arc::new(EchoAdvisor), Arc::new(FixedSummarizer)))
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_missing_fields_is_bad_request() {
        let response = app()
            .oneshot(json_request(
                "/api/chat",
                serde_json::json!({ "message": "hello" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_chat_empty_field_is_bad_request() {
        let response = app()
            .oneshot(json_request(
                "/api/chat",
                serde_json::json!({ "userId": "u1", "message": "", "languageCode": "en-IN" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let response = app()
            .oneshot(json_request(
                "/api/chat",
                serde_json::json!({ "userId": "u1", "message": "hi", "languageCode": "hi-IN" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["languageCode"], "hi-IN");
        assert_eq!(body["response"], "(0) re: hi");
    }

    #[tokio::test]
    async fn test_chat_history_feeds_next_request() {
        let app = app();

        let first = json_request(
            "/api/chat",
            serde_json::json!({ "userId": "u1", "message": "one", "languageCode": "en-IN" }),
        );
        app.clone().oneshot(first).await.unwrap();

        let second = json_request(
            "/api/chat",
            serde_json::json!({ "userId": "u1", "message": "two", "languageCode": "en-IN" }),
        );
        let response = app.oneshot(second).await.unwrap();
        let body = body_json(response).await;
        // Two turns recorded by the first exchange
        assert_eq!(body["response"], "(2) re: two");
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_is_internal_error() {
        let app = create_router(test_state(
            Arc::new(FailingAdvisor),
            Arc::new(FixedSummarizer),
        ));
        let response = app
            .oneshot(json_request(
                "/api/chat",
                serde_json::json!({ "userId": "u1", "message": "hi", "languageCode": "en-IN" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_summarize_round_trip() {
        let response = app()
            .oneshot(json_request(
                "/api/summarize",
                serde_json::json!({ "messages": [
                    { "text": "hi", "sender": "user" },
                    { "text": "hello", "sender": "bot" },
                ]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["summary"]["keyPoints"][0], "home loan");
    }

    #[tokio::test]
    async fn test_summarize_failure_is_internal_error() {
        let app = create_router(test_state(
            Arc::new(EchoAdvisor),
            Arc::new(FailingSummarizer),
        ));
        let response = app
            .oneshot(json_request(
                "/api/summarize",
                serde_json::json!({ "messages": [] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_guided_session_flow() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/sessions",
                serde_json::json!({ "languageCode": "en-IN" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let session_id = created["sessionId"].as_str().unwrap().to_string();
        assert!(created["greeting"].as_str().unwrap().contains("loan"));

        let response = app
            .clone()
            .oneshot(json_request(
                &format!("/api/sessions/{session_id}/message"),
                serde_json::json!({ "message": "I need a home loan" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["loanType"], "home");
        assert_eq!(body["step"], 1);
        // Reply audio comes back as base64 clips
        assert_eq!(body["audio"][0], BASE64.encode([1u8, 2, 3]));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(&format!("/api/sessions/{session_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let status = body_json(response).await;
        assert_eq!(status["loanType"], "home");

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&format!("/api/sessions/{session_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_session_audio_transcribes_and_advances() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request("/api/sessions", serde_json::json!({})))
            .await
            .unwrap();
        let created = body_json(response).await;
        let session_id = created["sessionId"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/sessions/{session_id}/audio"))
                    .header(header::CONTENT_TYPE, "audio/wav")
                    .body(Body::from(vec![0u8; 128]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // Stub transcript mentions a home loan, so the script starts
        assert_eq!(body["loanType"], "home");
        assert_eq!(body["step"], 1);
    }

    #[tokio::test]
    async fn test_session_audio_failure_prompts_retry() {
        let app = create_router(test_state_with_stt(
            Arc::new(EchoAdvisor),
            Arc::new(FixedSummarizer),
            StubStt(None),
        ));

        let response = app
            .clone()
            .oneshot(json_request("/api/sessions", serde_json::json!({})))
            .await
            .unwrap();
        let created = body_json(response).await;
        let session_id = created["sessionId"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/sessions/{session_id}/audio"))
                    .body(Body::from(vec![0u8; 128]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], RETRY_PROMPT);
        // Conversation state untouched
        assert!(body["loanType"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let response = app()
            .oneshot(json_request(
                "/api/sessions/nope/message",
                serde_json::json!({ "message": "hi" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_language_is_bad_request() {
        let response = app()
            .oneshot(json_request(
                "/api/sessions",
                serde_json::json!({ "languageCode": "fr-FR" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }
}
