use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::recommend::recommendation_router;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

fn router() -> axum::Router {
    recommendation_router(Arc::new(catalog()))
}

#[tokio::test]
async fn recommendations_route_returns_a_ranked_shortlist() {
    let request = Request::post("/api/v1/recommendations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "answers": {
                    "persona": "worker",
                    "immediate_need": "workplace_issue",
                    "urgency": "immediate"
                }
            })
            .to_string(),
        ))
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let recommendations = body["recommendations"].as_array().expect("array");
    assert!(recommendations.len() <= 3);

    let top = &recommendations[0];
    assert_eq!(top["rank"], 1);
    assert_eq!(top["badge"], "top match");
    assert_eq!(top["id"], "workplace-advisory");
    assert_eq!(top["confidence"], "high");
    assert_eq!(top["access"], "Call 6213-8008 now for immediate assistance");
    assert!(top["reasons"].as_array().expect("reasons").len() >= 1);

    if let Some(second) = recommendations.get(1) {
        assert_eq!(second["badge"], "recommended");
    }
    if let Some(third) = recommendations.get(2) {
        assert_eq!(third["badge"], "also consider");
    }
}

#[tokio::test]
async fn recommendations_route_accepts_an_empty_answer_set() {
    let request = Request::post("/api/v1/recommendations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({}).to_string()))
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let recommendations = body["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 3);
    for entry in recommendations {
        assert_eq!(entry["confidence"], "low");
    }
}

#[tokio::test]
async fn questions_route_serves_the_questionnaire() {
    let request = Request::get("/api/v1/questions")
        .body(Body::empty())
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let questions = body.as_array().expect("array");
    assert_eq!(questions.len(), 7);
    assert_eq!(questions[0]["id"], "persona");
}

#[tokio::test]
async fn services_route_returns_the_full_catalog() {
    let request = Request::get("/api/v1/services")
        .body(Body::empty())
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let services = body["services"].as_array().expect("array");
    assert_eq!(services.len(), catalog().len());
    assert_eq!(services[0]["targetAudience"][0], "worker");
}
