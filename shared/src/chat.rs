use serde::{Deserialize, Serialize};

use crate::tour::TourStop;
use crate::{GroundingLink, GuideRequest, GuideResponse};

pub const GUIDE_ERROR_TEXT: &str =
    "I encountered an error connecting to my historical databases. Please try again.";

pub const GUIDE_FALLBACK_TEXT: &str = "I'm sorry, I couldn't find information on that right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<GroundingLink>,
}

/// How much of the active stop is spelled out in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    #[default]
    NameOnly,
    NameAndCoordinates,
}

pub fn compose_prompt(stop: &TourStop, text: &str, style: PromptStyle) -> String {
    match style {
        PromptStyle::NameOnly => format!("I am currently standing at the {}. {text}", stop.title),
        PromptStyle::NameAndCoordinates => format!(
            "I am currently standing at the {} ({:.4}, {:.4}). {text}",
            stop.title, stop.coordinate.lat, stop.coordinate.lon
        ),
    }
}

/// In-memory conversation for one session.
#[derive(Debug, Default, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    in_flight: usize,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight > 0
    }

    /// Records the user's question and builds the request for the guide.
    /// Blank input is dropped.
    pub fn submit(&mut self, text: &str, stop: &TourStop, style: PromptStyle) -> Option<GuideRequest> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
            links: Vec::new(),
        });
        self.in_flight += 1;
        Some(GuideRequest {
            prompt: compose_prompt(stop, text, style),
            location: Some(stop.coordinate),
        })
    }

    /// Appends the guide's answer, or the fixed apology on any failure.
    pub fn receive<E>(&mut self, result: Result<GuideResponse, E>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let message = match result {
            Ok(reply) => ChatMessage {
                role: Role::Assistant,
                text: reply.text,
                links: reply.links,
            },
            Err(_) => ChatMessage {
                role: Role::Assistant,
                text: GUIDE_ERROR_TEXT.to_string(),
                links: Vec::new(),
            },
        };
        self.messages.push(message);
    }
}
