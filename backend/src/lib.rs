pub mod config;
pub mod error;
pub mod gemini;
pub mod guide;

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use shared::{ApiError, GuideRequest, GuideResponse};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::GuideError;
use crate::gemini::GuideModel;
use crate::guide::ask_guide;

pub struct AppState<M> {
    pub model: Arc<M>,
}

impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
        }
    }
}

pub fn create_router<M: GuideModel>(state: AppState<M>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/guide", post(guide_handler::<M>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn guide_handler<M: GuideModel>(
    State(state): State<AppState<M>>,
    Json(req): Json<GuideRequest>,
) -> Result<Json<GuideResponse>, (StatusCode, Json<ApiError>)> {
    tracing::info!(
        "guide request: {} chars, bias {:?}",
        req.prompt.chars().count(),
        req.location
    );

    match ask_guide(state.model.as_ref(), &req).await {
        Ok(reply) => {
            tracing::debug!("guide reply with {} link(s)", reply.links.len());
            Ok(Json(reply))
        }
        Err(err) => {
            tracing::error!("guide request failed: {err}");
            Err(api_error(err))
        }
    }
}

pub const GUIDE_UNAVAILABLE: &str = "guide is unavailable";

/// Upstream details stay in the log; callers only learn the guide is down.
fn api_error(err: GuideError) -> (StatusCode, Json<ApiError>) {
    let (status, message) = match err {
        GuideError::EmptyPrompt => (StatusCode::BAD_REQUEST, err.to_string()),
        GuideError::MissingApiKey
        | GuideError::Http(_)
        | GuideError::Upstream { .. }
        | GuideError::Decode(_) => (StatusCode::BAD_GATEWAY, GUIDE_UNAVAILABLE.to_string()),
    };
    (status, Json(ApiError { message }))
}
