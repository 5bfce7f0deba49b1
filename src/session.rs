use crate::error::ValidationError;
use crate::filter::{tag_universe, visible, FilterOutcome, RecipeFilter};
use crate::model::{Recipe, RecipeDraft, RecipePatch};
use crate::storage::StorageBackend;
use crate::store::RecipeStore;
use crate::suggest::{request_suggestions, ChatCompletion, SuggestionState};

/// Top-level application state: the store, the two filter inputs, the
/// in-memory API key, and the current suggestion cycle. Subordinate
/// surfaces borrow this instead of reaching for globals.
///
/// The API key lives here for the session only and is never persisted.
pub struct Session<B: StorageBackend> {
    store: RecipeStore<B>,
    filter: RecipeFilter,
    api_key: String,
    chat: Box<dyn ChatCompletion>,
    suggestion: SuggestionState,
}

impl<B: StorageBackend> Session<B> {
    pub fn new(store: RecipeStore<B>, chat: Box<dyn ChatCompletion>) -> Self {
        Session {
            store,
            filter: RecipeFilter::default(),
            api_key: String::new(),
            chat,
            suggestion: SuggestionState::Idle,
        }
    }

    // --- recipes ---

    /// Validate at the form boundary, then hand the normalized draft to the
    /// store. Only drafts that pass validation reach the collection here.
    pub fn add_recipe(&mut self, draft: RecipeDraft) -> Result<Recipe, ValidationError> {
        draft.validate()?;
        Ok(self.store.create(draft.normalized()))
    }

    /// Full-form edit: validates like a create, then overwrites every
    /// user-editable field of the matching recipe. Unknown ids fall through
    /// to the store's silent no-op.
    pub fn edit_recipe(&mut self, id: &str, draft: RecipeDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.store.update(id, RecipePatch::from(draft.normalized()));
        Ok(())
    }

    pub fn delete_recipe(&mut self, id: &str) {
        self.store.delete(id);
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.store.get(id)
    }

    pub fn store(&self) -> &RecipeStore<B> {
        &self.store
    }

    // --- filtering ---

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.filter.tag = tag.into();
    }

    pub fn filter(&self) -> &RecipeFilter {
        &self.filter
    }

    /// The visible subset under the current filter, recomputed on demand.
    pub fn visible(&self) -> FilterOutcome<'_> {
        visible(self.store.recipes(), &self.filter)
    }

    pub fn tags(&self) -> Vec<String> {
        tag_universe(self.store.recipes())
    }

    /// (visible, total) for the "Showing X of Y recipes" footer.
    pub fn counts(&self) -> (usize, usize) {
        (self.visible().recipes().len(), self.store.len())
    }

    // --- credential ---

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = key.into();
    }

    pub fn clear_api_key(&mut self) {
        self.api_key.clear();
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    // --- suggestions ---

    pub fn suggestion(&self) -> &SuggestionState {
        &self.suggestion
    }

    /// Run one suggestion cycle and record where it ended. A new submit
    /// clears the prior result or error; a submit while a request is
    /// outstanding is refused rather than raced. A request future dropped
    /// mid-flight returns the cycle to idle instead of leaving it stuck
    /// busy.
    pub async fn suggest(&mut self, ingredients: &str) -> &SuggestionState {
        if self.suggestion.is_busy() {
            return &self.suggestion;
        }

        self.suggestion = SuggestionState::Requesting;
        let guard = CycleGuard {
            state: &mut self.suggestion,
        };
        let outcome =
            match request_suggestions(self.chat.as_ref(), &self.api_key, ingredients).await {
                Ok(text) => SuggestionState::Succeeded(text),
                Err(err) => SuggestionState::Failed(err.to_string()),
            };
        *guard.state = outcome;
        drop(guard);
        &self.suggestion
    }
}

/// Puts a cycle stranded in `Requesting` back to idle when the request
/// future is dropped before it settles.
struct CycleGuard<'a> {
    state: &'a mut SuggestionState,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if self.state.is_busy() {
            *self.state = SuggestionState::Idle;
        }
    }
}
