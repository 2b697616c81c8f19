pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::report::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/reports/paginate", post(handlers::handle_paginate))
        .route("/api/v1/reports/blocks", post(handlers::handle_blocks))
        .route("/api/v1/reports/markdown", post(handlers::handle_markdown))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MetricMeasurer, PageGeometry};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn make_router() -> Router {
        build_router(AppState {
            geometry: PageGeometry::letter(),
            measurer: Arc::new(MetricMeasurer::default()),
        })
    }

    fn report_body() -> Value {
        json!({
            "analysis": {
                "session_title": "Intake session",
                "recorded_at": "2024-05-02T10:00:00Z",
                "duration_seconds": 1500,
                "summary": "The coach set a clear agenda.",
                "strengths": ["Curiosity"],
                "growth_areas": ["Summarising"],
                "techniques": [{
                    "id": "6f1c2a0e-4b7d-4c5e-9a1b-2d3e4f5a6b7c",
                    "name": "Open questions",
                    "rating": 4,
                    "feedback": "Used throughout.",
                    "evidence": ["\"What would success look like?\""],
                    "suggestions": ["Leave longer pauses after asking"]
                }],
                "next_steps": ["Agree on homework"]
            }
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_paginate_route_returns_document() {
        let response = make_router()
            .oneshot(post_json("/api/v1/reports/paginate", &report_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["page_count"], 1);
        assert_eq!(body["pages"][0]["footer_label"], "Page 1 of 1");
        assert_eq!(body["pages"][0]["metadata"]["title"], "Intake session");
    }

    #[tokio::test]
    async fn test_blocks_route_returns_block_list() {
        let response = make_router()
            .oneshot(post_json("/api/v1/reports/blocks", &report_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["blocks"][0]["type"], "document_header");
    }

    #[tokio::test]
    async fn test_markdown_route_returns_markdown() {
        let response = make_router()
            .oneshot(post_json("/api/v1/reports/markdown", &report_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/markdown; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_paginate_route_maps_geometry_error_to_400() {
        let mut body = report_body();
        body["geometry"] = json!({
            "page_width": 612.0,
            "page_height": 792.0,
            "margin": 500.0,
            "header_height": 28.0,
            "footer_height": 24.0,
            "block_spacing": 12.0
        });
        let response = make_router()
            .oneshot(post_json("/api/v1/reports/paginate", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_GEOMETRY");
    }

    #[tokio::test]
    async fn test_paginate_route_rejects_get() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/reports/paginate")
            .body(Body::empty())
            .unwrap();
        let response = make_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_route() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = make_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }
}
