//! API handlers for the canned AI prompts

use super::handlers::{AppError, NotesState};
use crate::prompts::PromptKind;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AiRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AiResponse {
    pub result: String,
}

async fn run_prompt(
    state: NotesState,
    kind: PromptKind,
    body: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<AiResponse>, AppError> {
    let Json(AiRequest { text }) = body?;
    let result = state.prompts.run(kind, &text).await?;
    Ok(Json(AiResponse { result }))
}

/// Summarize the given text
pub async fn summarize(
    State(state): State<NotesState>,
    body: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<AiResponse>, AppError> {
    run_prompt(state, PromptKind::Summarize, body).await
}

/// Five ideas on the given topic
pub async fn ideas(
    State(state): State<NotesState>,
    body: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<AiResponse>, AppError> {
    run_prompt(state, PromptKind::Ideas, body).await
}

/// Rewrite the given text
pub async fn improve(
    State(state): State<NotesState>,
    body: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<AiResponse>, AppError> {
    run_prompt(state, PromptKind::Improve, body).await
}

/// Answer the given question
pub async fn answer(
    State(state): State<NotesState>,
    body: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<AiResponse>, AppError> {
    run_prompt(state, PromptKind::Answer, body).await
}

#[cfg(test)]
mod tests {
    use crate::api::create_router;
    use crate::prompts::PromptKind;
    use crate::test_helpers::mock_server_state;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt; // oneshot

    fn post(uri: &str, body: Value) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_each_route_sends_its_template() {
        let routes = [
            ("/api/ai/summarize", PromptKind::Summarize),
            ("/api/ai/ideas", PromptKind::Ideas),
            ("/api/ai/improve", PromptKind::Improve),
            ("/api/ai/answer", PromptKind::Answer),
        ];

        for (uri, kind) in routes {
            let (state, _, client) = mock_server_state();
            client.set_reply("model says hi");
            let app = create_router(state);

            let resp = app
                .oneshot(post(uri, json!({"text": "some input"})))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
            assert_eq!(body_json(resp).await, json!({"result": "model says hi"}));
            assert_eq!(client.messages(), vec![kind.render("some input")]);
        }
    }

    #[tokio::test]
    async fn test_model_failure_is_503() {
        let (state, _, client) = mock_server_state();
        client.set_failure("credentials expired");
        let app = create_router(state);

        let resp = app
            .oneshot(post("/api/ai/answer", json!({"text": "why?"})))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Model unavailable: credentials expired");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_text_is_400_without_model_call() {
        let (state, _, client) = mock_server_state();
        let app = create_router(state);

        let resp = app
            .oneshot(post("/api/ai/summarize", json!({"body": "wrong field"})))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(client.call_count(), 0);
    }
}
