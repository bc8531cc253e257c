pub mod chat;
pub mod locate;
pub mod tour;

use serde::{Deserialize, Serialize};

pub use chat::{ChatLog, ChatMessage, PromptStyle, Role};
pub use locate::TourSelection;
pub use tour::{ACROPOLIS_CENTER, ACROPOLIS_STOPS, TourStop};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// A Google Maps citation returned alongside a guide reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideRequest {
    pub prompt: String,
    /// Coordinate used to bias maps retrieval. The backend falls back to
    /// [`ACROPOLIS_CENTER`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideResponse {
    pub text: String,
    #[serde(default)]
    pub links: Vec<GroundingLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_request_omits_missing_location() {
        let req = GuideRequest {
            prompt: "Where is the museum?".into(),
            location: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("location").is_none());
    }

    #[test]
    fn guide_response_links_default_to_empty() {
        let body: GuideResponse = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert!(body.links.is_empty());
    }
}
