use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A stored recipe. The whole collection is persisted as a JSON array of
/// these records, so field names stay camelCase on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Assigned by the store at creation, immutable afterwards.
    pub id: String,
    pub name: String,
    /// One logical ingredient per entry, in display order.
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// RFC 3339 timestamp assigned at creation.
    pub created_at: String,
}

/// Form input for a new or edited recipe, lacking the store-assigned fields.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}

impl RecipeDraft {
    /// Check the required fields the entry form enforces. The store itself
    /// accepts whatever it is given; validation lives at the form boundary.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !self.ingredients.iter().any(|i| !i.trim().is_empty()) {
            return Err(ValidationError::MissingIngredients);
        }
        if self.instructions.trim().is_empty() {
            return Err(ValidationError::MissingInstructions);
        }
        Ok(())
    }

    /// Drop blank ingredient and tag entries, the way the entry form
    /// filters empty lines before submitting.
    pub fn normalized(mut self) -> Self {
        self.ingredients.retain(|i| !i.trim().is_empty());
        self.tags.retain(|t| !t.trim().is_empty());
        if let Some(url) = &self.image_url {
            if url.trim().is_empty() {
                self.image_url = None;
            }
        }
        self
    }
}

/// Field-level partial update applied by [`crate::store::RecipeStore::update`].
/// A `None` field leaves the stored value untouched; `image_url` is doubly
/// optional so a patch can also clear the image.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<Option<String>>,
}

impl From<RecipeDraft> for RecipePatch {
    /// A full-form edit overwrites every user-editable field.
    fn from(draft: RecipeDraft) -> Self {
        RecipePatch {
            name: Some(draft.name),
            ingredients: Some(draft.ingredients),
            instructions: Some(draft.instructions),
            tags: Some(draft.tags),
            image_url: Some(draft.image_url),
        }
    }
}
