use std::future::Future;

use serde::{Deserialize, Serialize};
use shared::{Coordinate, GroundingLink, GuideResponse, chat::GUIDE_FALLBACK_TEXT};

use crate::config::GuideConfig;
use crate::error::GuideError;
use crate::guide::SYSTEM_INSTRUCTION;

/// Completion backend for the guide chat.
///
/// Implemented by [`GeminiClient`] in production and by canned stubs in
/// tests, so the HTTP layer can be exercised without network access.
///
/// # Contract
/// - `prompt` is non-empty and already carries the stop context
/// - `location` biases maps retrieval
/// - an empty model answer is reported as [`GUIDE_FALLBACK_TEXT`], not an error
pub trait GuideModel: Send + Sync + 'static {
    fn generate(
        &self,
        prompt: &str,
        location: Coordinate,
    ) -> impl Future<Output = Result<GuideResponse, GuideError>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    tools: Vec<Tool>,
    tool_config: ToolConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_maps: GoogleMaps,
}

#[derive(Debug, Serialize)]
struct GoogleMaps {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn new(prompt: &'a str, system_instruction: &'a str, location: Coordinate) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: prompt }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![TextPart {
                    text: system_instruction,
                }],
            },
            tools: vec![Tool {
                google_maps: GoogleMaps {},
            }],
            tool_config: ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude: location.lat,
                        longitude: location.lon,
                    },
                },
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    maps: Option<MapsChunk>,
}

#[derive(Debug, Deserialize)]
struct MapsChunk {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate plus its maps citations.
    pub fn into_reply(self) -> GuideResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return GuideResponse {
                text: GUIDE_FALLBACK_TEXT.to_string(),
                links: Vec::new(),
            };
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let links = candidate
            .grounding_metadata
            .map(|meta| {
                meta.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.maps)
                    .map(|maps| GroundingLink {
                        uri: maps.uri,
                        title: maps.title,
                    })
                    .collect()
            })
            .unwrap_or_default();

        GuideResponse {
            text: if text.trim().is_empty() {
                GUIDE_FALLBACK_TEXT.to_string()
            } else {
                text
            },
            links,
        }
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: GuideConfig,
}

impl GeminiClient {
    pub fn new(config: GuideConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

impl GuideModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        location: Coordinate,
    ) -> Result<GuideResponse, GuideError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GuideError::MissingApiKey)?;

        let body = GenerateContentRequest::new(prompt, SYSTEM_INSTRUCTION, location);
        tracing::debug!(
            "calling {} with bias ({:.4}, {:.4})",
            self.config.model,
            location.lat,
            location.lon
        );

        let response = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GuideError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.into_reply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_carries_maps_tool_and_bias() {
        let location = Coordinate {
            lat: 37.9715,
            lon: 23.7266,
        };
        let body = GenerateContentRequest::new("Hi", "Be brief.", location);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "Hi"}]}],
                "systemInstruction": {"parts": [{"text": "Be brief."}]},
                "tools": [{"googleMaps": {}}],
                "toolConfig": {
                    "retrievalConfig": {
                        "latLng": {"latitude": 37.9715, "longitude": 23.7266}
                    }
                }
            })
        );
    }

    #[test]
    fn test_reply_joins_parts_and_keeps_maps_links() {
        let raw = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Stand "}, {"text": "by the west steps."}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"maps": {"uri": "https://maps.google.com/?cid=42", "title": "Parthenon"}},
                        {"web": {"uri": "https://example.org", "title": "ignored"}}
                    ]
                }
            }]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let reply = parsed.into_reply();

        assert_eq!(reply.text, "Stand by the west steps.");
        assert_eq!(
            reply.links,
            vec![GroundingLink {
                uri: "https://maps.google.com/?cid=42".into(),
                title: "Parthenon".into(),
            }]
        );
    }

    #[test]
    fn test_empty_reply_falls_back() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed.into_reply().text, GUIDE_FALLBACK_TEXT);

        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": []}}]})).unwrap();
        let reply = parsed.into_reply();
        assert_eq!(reply.text, GUIDE_FALLBACK_TEXT);
        assert!(reply.links.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(GuideConfig::default());
        let err = client
            .generate("Hello", shared::ACROPOLIS_CENTER)
            .await
            .unwrap_err();
        assert!(matches!(err, GuideError::MissingApiKey));
    }
}
