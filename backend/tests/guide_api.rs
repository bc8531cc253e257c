use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::Request,
};
use backend::{AppState, GUIDE_UNAVAILABLE, create_router, error::GuideError, gemini::GuideModel};
use hyper::StatusCode;
use serde_json::json;
use shared::{
    ACROPOLIS_STOPS, ApiError, ChatLog, Coordinate, GroundingLink, GuideResponse, PromptStyle,
    Role, chat::GUIDE_ERROR_TEXT,
};
use tower::ServiceExt;

struct CannedModel;

impl GuideModel for CannedModel {
    async fn generate(
        &self,
        prompt: &str,
        location: Coordinate,
    ) -> Result<GuideResponse, GuideError> {
        Ok(GuideResponse {
            text: format!("{prompt} @ {:.4},{:.4}", location.lat, location.lon),
            links: vec![GroundingLink {
                uri: "https://maps.google.com/?cid=7".into(),
                title: "Acropolis Museum".into(),
            }],
        })
    }
}

struct FailingModel;

impl GuideModel for FailingModel {
    async fn generate(
        &self,
        _prompt: &str,
        _location: Coordinate,
    ) -> Result<GuideResponse, GuideError> {
        Err(GuideError::Upstream {
            status: 429,
            body: "quota exceeded".into(),
        })
    }
}

fn test_app<M: GuideModel>(model: M) -> axum::Router {
    create_router(AppState {
        model: Arc::new(model),
    })
}

fn guide_request(payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/guide")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn guide_endpoint_returns_text_and_links() {
    let app = test_app(CannedModel);
    let payload = json!({
        "prompt": "I am currently standing at the The Parthenon. Best photo?",
        "location": {"lat": 37.9715, "lon": 23.7266}
    });

    let response = app.oneshot(guide_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: GuideResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(body.text.starts_with("I am currently standing at the The Parthenon."));
    assert!(body.text.ends_with("@ 37.9715,23.7266"));
    assert_eq!(body.links.len(), 1);
}

#[tokio::test]
async fn guide_endpoint_defaults_bias_to_site_center() {
    let app = test_app(CannedModel);
    let response = app
        .oneshot(guide_request(json!({"prompt": "Any toilets nearby?"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: GuideResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(body.text.ends_with("@ 37.9715,23.7257"));
}

#[tokio::test]
async fn blank_prompt_is_rejected() {
    let app = test_app(CannedModel);
    let response = app
        .oneshot(guide_request(json!({"prompt": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn model_failure_maps_to_bad_gateway() {
    let app = test_app(FailingModel);
    let response = app
        .oneshot(guide_request(json!({"prompt": "Hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: ApiError = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.message, GUIDE_UNAVAILABLE);
    assert!(!body.message.contains("quota exceeded"));
}

#[tokio::test]
async fn chat_log_round_trip_through_router() {
    let app = test_app(FailingModel);
    let mut log = ChatLog::new();
    let stop = &ACROPOLIS_STOPS[3];

    let req = log
        .submit("Where are the Caryatids?", stop, PromptStyle::NameOnly)
        .expect("non-blank question");
    let response = app
        .oneshot(guide_request(serde_json::to_value(&req).unwrap()))
        .await
        .unwrap();

    let result: Result<GuideResponse, StatusCode> = if response.status().is_success() {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        Ok(serde_json::from_slice(&bytes).unwrap())
    } else {
        Err(response.status())
    };
    log.receive(result);

    assert_eq!(log.messages().len(), 2);
    let reply = &log.messages()[1];
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.text, GUIDE_ERROR_TEXT);
    assert!(reply.links.is_empty());
}
