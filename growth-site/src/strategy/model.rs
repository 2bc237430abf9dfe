use serde::{Deserialize, Serialize};

use constants::strategy::KEY_POINT_COUNT;

/// Landing-page structure suggested for a business niche.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub headline: String,
    pub key_points: [String; KEY_POINT_COUNT],
    pub call_to_action: String,
}

impl StrategyResult {
    /// Parse the model's JSON text. Extra fields are ignored; a `keyPoints`
    /// array of any length other than three is rejected.
    pub fn from_json(text: &str) -> Result<Self, StrategyError> {
        serde_json::from_str(text).map_err(|e| StrategyError::Parse(e.to_string()))
    }
}

/// What the strategy panel is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestLifecycle {
    #[default]
    Idle,
    Loading,
    Success(StrategyResult),
    Error,
}

impl RequestLifecycle {
    pub fn name(&self) -> &'static str {
        match self {
            RequestLifecycle::Idle => "idle",
            RequestLifecycle::Loading => "loading",
            RequestLifecycle::Success(_) => "success",
            RequestLifecycle::Error => "error",
        }
    }

    pub fn result(&self) -> Option<&StrategyResult> {
        match self {
            RequestLifecycle::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestLifecycle::Loading)
    }
}

/// Failure reaching or reading the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    MissingApiKey,
    Transport(String),
    Status(u16),
    EmptyResponse,
    Parse(String),
}

impl std::fmt::Display for StrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyError::MissingApiKey => write!(f, "No API key configured"),
            StrategyError::Transport(e) => write!(f, "Request failed: {}", e),
            StrategyError::Status(code) => write!(f, "Endpoint returned HTTP {}", code),
            StrategyError::EmptyResponse => write!(f, "No response text from the model"),
            StrategyError::Parse(e) => write!(f, "Malformed strategy JSON: {}", e),
        }
    }
}

impl std::error::Error for StrategyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_payload() {
        let result = StrategyResult::from_json(
            r#"{"headline":"Vende más café","keyPoints":["Origen","Frescura","Envío"],"callToAction":"Pide ya","extra":1}"#,
        )
        .expect("valid payload");

        assert_eq!(result.headline, "Vende más café");
        assert_eq!(result.key_points[2], "Envío");
        assert_eq!(result.call_to_action, "Pide ya");
    }

    #[test]
    fn rejects_wrong_key_point_count() {
        for points in [r#"["a","b"]"#, r#"["a","b","c","d"]"#, "[]"] {
            let text = format!(r#"{{"headline":"h","keyPoints":{points},"callToAction":"c"}}"#);
            assert!(matches!(
                StrategyResult::from_json(&text),
                Err(StrategyError::Parse(_))
            ));
        }
    }

    #[test]
    fn rejects_missing_fields_and_non_json() {
        assert!(StrategyResult::from_json(r#"{"headline":"h","keyPoints":["a","b","c"]}"#).is_err());
        assert!(StrategyResult::from_json("not json").is_err());
    }

    #[test]
    fn serialises_back_to_camel_case() {
        let result = StrategyResult {
            headline: "h".into(),
            key_points: ["a".into(), "b".into(), "c".into()],
            call_to_action: "c".into(),
        };
        let value = serde_json::to_value(&result).expect("serialise");
        assert_eq!(value["keyPoints"][1], "b");
        assert_eq!(value["callToAction"], "c");
    }
}
