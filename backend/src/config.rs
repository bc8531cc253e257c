pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl GuideConfig {
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_model() {
        let config = GuideConfig::default();
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let config = GuideConfig {
            api_base: "http://localhost:9000/".into(),
            model: "test-model".into(),
            ..GuideConfig::default()
        };
        assert_eq!(
            config.endpoint(),
            "http://localhost:9000/models/test-model:generateContent"
        );
    }
}
