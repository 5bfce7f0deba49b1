//! Local recipe catalog with AI-powered cooking suggestions.
//!
//! The collection lives in memory behind [`RecipeStore`] and is written
//! through as a full JSON snapshot to a [`StorageBackend`] after every
//! mutation. [`filter`] derives the visible subset and the tag universe.
//! [`suggest`] runs one chat-completion cycle per explicit user action and
//! reduces the response, or failure, to display text. [`Session`] ties the
//! pieces together for a presentation shell.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;
pub mod suggest;

pub use config::AppConfig;
pub use error::{StoreError, SuggestError, ValidationError};
pub use filter::{tag_universe, visible, FilterOutcome, RecipeFilter};
pub use model::{Recipe, RecipeDraft, RecipePatch};
pub use session::Session;
pub use storage::{FileBackend, MemoryBackend, StorageBackend, STORAGE_KEY};
pub use store::RecipeStore;
pub use suggest::{
    request_suggestions, suggestion_prompt, ChatCompletion, OpenAiClient, SuggestionState,
    DEFAULT_MODEL, NO_SUGGESTIONS_PLACEHOLDER,
};
