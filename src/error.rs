use thiserror::Error;

/// Required-field failures raised at the entry-form boundary.
///
/// These never reach the recipe store; the store accepts whatever it is
/// handed and leaves validation to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Recipe name is required
    #[error("Recipe name is required")]
    MissingName,

    /// At least one ingredient is required
    #[error("At least one ingredient is required")]
    MissingIngredients,

    /// Instructions are required
    #[error("Instructions are required")]
    MissingInstructions,
}

/// Errors from the persistence capability backing the recipe store.
///
/// These are non-fatal by design: a corrupt payload on load falls back to an
/// empty collection, and a failed write leaves the in-memory state
/// authoritative for the session.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the persisted collection
    #[error("Failed to read stored recipes: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the persisted collection
    #[error("Failed to write stored recipes: {0}")]
    Write(#[source] std::io::Error),

    /// Persisted payload is not a valid recipe collection
    #[error("Stored recipes are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors from a suggestion cycle, local validation and remote alike.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// Ingredient text was empty after trimming; no request was made
    #[error("Please enter some ingredients")]
    MissingIngredients,

    /// No API key is configured; no request was made
    #[error("Please set your OpenAI API key first")]
    MissingApiKey,

    /// Transport-level failure reaching the completion endpoint
    #[error("Failed to get suggestions: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion endpoint rejected the request; carries the service's
    /// own message verbatim when one was available
    #[error("{0}")]
    Remote(String),
}
