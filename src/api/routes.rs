//! API route definitions

use super::ai_handlers;
use super::handlers::{self, NotesState};
use super::note_handlers;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the CORS layer from the configured origins. `*` allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o.trim() == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Create the API router
pub fn create_router(state: NotesState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // ====================================================================
        // Notes
        // ====================================================================
        .route(
            "/api/notes",
            get(note_handlers::list_notes).post(note_handlers::create_note),
        )
        .route("/api/notes/search", get(note_handlers::search_notes))
        .route(
            "/api/notes/{id}",
            get(note_handlers::get_note)
                .put(note_handlers::update_note)
                .delete(note_handlers::delete_note),
        )
        // ====================================================================
        // AI prompts
        // ====================================================================
        .route("/api/ai/summarize", post(ai_handlers::summarize))
        .route("/api/ai/ideas", post(ai_handlers::ideas))
        .route("/api/ai/improve", post(ai_handlers::improve))
        .route("/api/ai/answer", post(ai_handlers::answer))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::mock_server_state;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt; // oneshot

    #[tokio::test]
    async fn test_health_ok_and_unhealthy() {
        let (state, store, _) = mock_server_state();

        let req = HttpRequest::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = create_router(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));

        store.set_unavailable(true);
        let req = HttpRequest::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = create_router(state).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_only() {
        let (state, _, _) = mock_server_state();

        let req = HttpRequest::builder()
            .uri("/api/notes")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let resp = create_router(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );

        let req = HttpRequest::builder()
            .uri("/api/notes")
            .header("origin", "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let resp = create_router(state).oneshot(req).await.unwrap();
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (state, _, _) = mock_server_state();

        let req = HttpRequest::builder()
            .method("OPTIONS")
            .uri("/api/ai/summarize")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let resp = create_router(state).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get("access-control-allow-methods").is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (state, _, _) = mock_server_state();
        let req = HttpRequest::builder()
            .uri("/api/projects")
            .body(Body::empty())
            .unwrap();
        let resp = create_router(state).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_wildcard_origin_builds() {
        let _ = cors_layer(&["*".to_string()]);
        let _ = cors_layer(&["http://a.example/".to_string(), "bad\norigin".to_string()]);
    }
}
