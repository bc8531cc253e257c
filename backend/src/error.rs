use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("no Gemini API key configured")]
    MissingApiKey,
    #[error("request to Gemini failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("invalid Gemini response: {0}")]
    Decode(#[from] serde_json::Error),
}
