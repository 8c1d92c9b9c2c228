//! Prompt construction for the completion request.

use crate::business::Business;
use crate::completion::{CompletionMessage, CompletionRequest, Role};

/// Model used for every completion.
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Output-token budget for every completion.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Instructional preamble of the system turn. The serialized business list
/// is appended directly after it.
pub const SYSTEM_PREAMBLE: &str = "You are an AI assistant for seniors in Atlanta, providing information about local businesses and assistance with daily tasks. Be concise, clear, and friendly in your responses. Use the following business information when relevant: ";

/// Model and token budget applied to outbound requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Render the system turn: preamble followed by the JSON business list.
pub fn system_prompt(businesses: &[Business]) -> Result<String, serde_json::Error> {
    let listing = serde_json::to_string(businesses)?;
    Ok(format!("{SYSTEM_PREAMBLE}{listing}"))
}

/// Build the two-turn completion request. The user text is forwarded verbatim.
pub fn build_request(
    settings: &PromptSettings,
    user_input: &str,
    businesses: &[Business],
) -> Result<CompletionRequest, serde_json::Error> {
    Ok(CompletionRequest {
        model: settings.model.clone(),
        max_tokens: settings.max_tokens,
        messages: vec![
            CompletionMessage {
                role: Role::System,
                content: system_prompt(businesses)?,
            },
            CompletionMessage {
                role: Role::User,
                content: user_input.to_string(),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Business> {
        vec![Business {
            name: "Midtown Senior Rides".into(),
            description: "Rides".into(),
            phone: "404-555-0178".into(),
            email: "rides@example.com".into(),
        }]
    }

    #[test]
    fn system_prompt_embeds_serialized_list() {
        let prompt = system_prompt(&sample()).unwrap();
        assert!(prompt.starts_with(SYSTEM_PREAMBLE));
        assert!(prompt.ends_with(
            r#"[{"name":"Midtown Senior Rides","description":"Rides","phone":"404-555-0178","email":"rides@example.com"}]"#
        ));
    }

    #[test]
    fn request_has_system_then_user_turn() {
        let req = build_request(&PromptSettings::default(), "  <b>hi</b>  ", &sample()).unwrap();
        assert_eq!(req.model, DEFAULT_MODEL);
        assert_eq!(req.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert_eq!(req.messages[1].role, Role::User);
        assert_eq!(req.messages[1].content, "  <b>hi</b>  ");
    }

    #[test]
    fn empty_directory_serializes_as_empty_array() {
        let prompt = system_prompt(&[]).unwrap();
        assert_eq!(prompt, format!("{SYSTEM_PREAMBLE}[]"));
    }
}
