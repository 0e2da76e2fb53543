use serde::{Deserialize, Serialize};

/// A selectable backend model for the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelIdentifier {
    #[serde(rename = "us.anthropic.claude-3-5-sonnet-20241022-v2:0")]
    Claude35SonnetV2,
    #[serde(rename = "us.anthropic.claude-3-5-sonnet-20240620-v1:0")]
    Claude35Sonnet,
    #[serde(rename = "us.anthropic.claude-3-5-haiku-20241022-v1:0")]
    Claude35Haiku,
    #[serde(rename = "us.anthropic.claude-3-opus-20240229-v1:0")]
    Claude3Opus,
    #[serde(rename = "us.anthropic.claude-3-sonnet-20240229-v1:0")]
    Claude3Sonnet,
    #[serde(rename = "us.anthropic.claude-3-haiku-20240307-v1:0")]
    Claude3Haiku,
}

impl ModelIdentifier {
    pub const ALL: [ModelIdentifier; 6] = [
        ModelIdentifier::Claude35SonnetV2,
        ModelIdentifier::Claude35Sonnet,
        ModelIdentifier::Claude35Haiku,
        ModelIdentifier::Claude3Opus,
        ModelIdentifier::Claude3Sonnet,
        ModelIdentifier::Claude3Haiku,
    ];

    /// Wire id sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelIdentifier::Claude35SonnetV2 => "us.anthropic.claude-3-5-sonnet-20241022-v2:0",
            ModelIdentifier::Claude35Sonnet => "us.anthropic.claude-3-5-sonnet-20240620-v1:0",
            ModelIdentifier::Claude35Haiku => "us.anthropic.claude-3-5-haiku-20241022-v1:0",
            ModelIdentifier::Claude3Opus => "us.anthropic.claude-3-opus-20240229-v1:0",
            ModelIdentifier::Claude3Sonnet => "us.anthropic.claude-3-sonnet-20240229-v1:0",
            ModelIdentifier::Claude3Haiku => "us.anthropic.claude-3-haiku-20240307-v1:0",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelIdentifier::Claude35SonnetV2 => "Claude 3.5 Sonnet v2 (new brain)",
            ModelIdentifier::Claude35Sonnet => "Claude 3.5 Sonnet (old best model)",
            ModelIdentifier::Claude35Haiku => "Claude 3.5 Haiku (another one)",
            ModelIdentifier::Claude3Opus => "Claude 3 Opus (wanna be best, but not quite..)",
            ModelIdentifier::Claude3Sonnet => "Claude 3 Sonnet (meh..)",
            ModelIdentifier::Claude3Haiku => "Claude 3 Haiku (ugh..)",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.as_str() == id)
    }
}

impl Default for ModelIdentifier {
    fn default() -> Self {
        ModelIdentifier::Claude35SonnetV2
    }
}

impl std::fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_model_has_display_name() {
        for model in ModelIdentifier::ALL {
            assert!(!model.display_name().is_empty(), "{:?} has no label", model);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = ModelIdentifier::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(ids.len(), ModelIdentifier::ALL.len());
    }

    #[test]
    fn test_from_id() {
        assert_eq!(
            ModelIdentifier::from_id("us.anthropic.claude-3-haiku-20240307-v1:0"),
            Some(ModelIdentifier::Claude3Haiku)
        );
        assert_eq!(ModelIdentifier::from_id("gpt-4"), None);
    }

    #[test]
    fn test_serializes_as_wire_id() {
        let json = serde_json::to_string(&ModelIdentifier::Claude3Opus).unwrap();
        assert_eq!(json, "\"us.anthropic.claude-3-opus-20240229-v1:0\"");
    }
}
