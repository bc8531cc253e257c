use shared::{ACROPOLIS_CENTER, GuideRequest, GuideResponse};

use crate::error::GuideError;
use crate::gemini::GuideModel;

pub const SYSTEM_INSTRUCTION: &str = "You are a world-class archaeologist and historian guiding a 2-hour tour of the Acropolis in Athens on February 16th at 10 AM. \
Be concise, engaging, and provide practical tips (like where to stand for the best photo or historical tidbits others miss). \
Always check Google Maps for current accessibility or specific location details if asked. \
If you find relevant places on Google Maps, the user will see the links automatically.";

/// Forwards one question to the model, biased toward the caller's stop or
/// the centre of the site.
pub async fn ask_guide<M: GuideModel>(
    model: &M,
    req: &GuideRequest,
) -> Result<GuideResponse, GuideError> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(GuideError::EmptyPrompt);
    }
    let location = req.location.unwrap_or(ACROPOLIS_CENTER);
    model.generate(prompt, location).await
}
