mod open_ai;
mod prompt;

pub use open_ai::{OpenAiClient, DEFAULT_MODEL, MAX_SUGGESTION_TOKENS};
pub use prompt::suggestion_prompt;

use async_trait::async_trait;

use crate::error::SuggestError;

/// Shown when the completion endpoint answers successfully but with no
/// content. That is a valid outcome, not an error.
pub const NO_SUGGESTIONS_PLACEHOLDER: &str = "No suggestions received";

/// The external chat-completion capability a suggestion cycle talks to.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Submit a single user-role prompt and return the completion text, or
    /// `None` when the response carried no content.
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<Option<String>, SuggestError>;
}

/// Where the current suggestion cycle stands:
/// `Idle -> Requesting -> {Succeeded, Failed}` and back to work on the next
/// submit. No partial or streaming states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionState {
    #[default]
    Idle,
    Requesting,
    Succeeded(String),
    Failed(String),
}

impl SuggestionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SuggestionState::Requesting)
    }
}

/// Run one suggestion cycle: validate the inputs, issue exactly one request,
/// and reduce the outcome to display text.
///
/// Validation happens before any network activity; an empty ingredient list
/// or missing credential never reaches the wire. There is no retry and no
/// caching of prior answers.
pub async fn request_suggestions(
    client: &dyn ChatCompletion,
    api_key: &str,
    ingredients: &str,
) -> Result<String, SuggestError> {
    let ingredients = ingredients.trim();
    if ingredients.is_empty() {
        return Err(SuggestError::MissingIngredients);
    }
    if api_key.is_empty() {
        return Err(SuggestError::MissingApiKey);
    }

    let prompt = suggestion_prompt(ingredients);
    match client.complete(api_key, &prompt).await? {
        Some(content) => Ok(content),
        None => Ok(NO_SUGGESTIONS_PLACEHOLDER.to_string()),
    }
}
