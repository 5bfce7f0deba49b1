use chrono::Utc;
use log::{error, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{Recipe, RecipeDraft, RecipePatch};
use crate::storage::{StorageBackend, STORAGE_KEY};

/// Owns the live recipe collection and writes a full snapshot through to the
/// storage backend after every mutation.
///
/// The in-memory collection is the source of truth for the session: a failed
/// write is logged but never rolls a mutation back. Collection order is
/// append order; edits and deletions never reorder surviving entries.
pub struct RecipeStore<B: StorageBackend> {
    backend: B,
    recipes: Vec<Recipe>,
}

impl<B: StorageBackend> RecipeStore<B> {
    /// Load the persisted collection. A missing payload starts the
    /// collection empty; an unparseable one is discarded with a warning
    /// rather than taking the application down.
    pub fn load(backend: B) -> Self {
        let recipes = match Self::read_collection(&backend) {
            Ok(recipes) => recipes,
            Err(err) => {
                warn!("Starting with an empty collection: {err}");
                Vec::new()
            }
        };

        RecipeStore { backend, recipes }
    }

    fn read_collection(backend: &B) -> Result<Vec<Recipe>, StoreError> {
        match backend.read(STORAGE_KEY)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Assign a fresh id and creation timestamp, append, and persist.
    /// The draft is stored as-is; required-field checks belong to the form.
    pub fn create(&mut self, draft: RecipeDraft) -> Recipe {
        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            tags: draft.tags,
            image_url: draft.image_url,
            created_at: Utc::now().to_rfc3339(),
        };

        self.recipes.push(recipe.clone());
        self.persist();
        recipe
    }

    /// Apply a field-level patch to the matching recipe. An unknown id is a
    /// silent no-op. `id` and `created_at` are not patchable.
    pub fn update(&mut self, id: &str, patch: RecipePatch) {
        let Some(recipe) = self.recipes.iter_mut().find(|r| r.id == id) else {
            return;
        };

        if let Some(name) = patch.name {
            recipe.name = name;
        }
        if let Some(ingredients) = patch.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = patch.instructions {
            recipe.instructions = instructions;
        }
        if let Some(tags) = patch.tags {
            recipe.tags = tags;
        }
        if let Some(image_url) = patch.image_url {
            recipe.image_url = image_url;
        }

        self.persist();
    }

    /// Remove the matching recipe permanently. A second delete of the same
    /// id is a no-op.
    pub fn delete(&mut self, id: &str) {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        if self.recipes.len() != before {
            self.persist();
        }
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.recipes) {
            Ok(payload) => payload,
            Err(err) => {
                error!("Failed to serialize recipes: {err}");
                return;
            }
        };

        if let Err(err) = self.backend.write(STORAGE_KEY, &payload) {
            // In-memory state stays authoritative for the session.
            error!("Failed to persist recipes: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryBackend;
    use std::collections::HashSet;

    fn draft(name: &str) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            ingredients: vec!["water".to_string()],
            instructions: "Mix.".to_string(),
            tags: vec![],
            image_url: None,
        }
    }

    #[test]
    fn test_load_missing_payload_starts_empty() {
        let store = RecipeStore::load(MemoryBackend::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_payload_falls_back_to_empty() {
        let mut backend = MemoryBackend::new();
        backend.write(STORAGE_KEY, "not json at all").unwrap();

        let store = RecipeStore::load(backend);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_assigns_unique_ids_and_timestamp() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let a = store.create(draft("Soup"));
        let b = store.create(draft("Stew"));

        assert_ne!(a.id, b.id);
        assert!(!a.created_at.is_empty());
        assert_eq!(store.len(), 2);
        assert_eq!(store.recipes()[0].name, "Soup");
        assert_eq!(store.recipes()[1].name, "Stew");
    }

    #[test]
    fn test_create_does_not_validate() {
        // Required-field enforcement is the form's job; handed an empty
        // name directly, the store still assigns id and timestamp.
        let mut store = RecipeStore::load(MemoryBackend::new());
        let recipe = store.create(RecipeDraft::default());

        assert!(!recipe.id.is_empty());
        assert!(!recipe.created_at.is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.recipes()[0].name, "");
    }

    #[test]
    fn test_update_merges_present_fields_only() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let recipe = store.create(draft("Soup"));

        store.update(
            &recipe.id,
            RecipePatch {
                name: Some("Bisque".to_string()),
                tags: Some(vec!["fancy".to_string()]),
                ..Default::default()
            },
        );

        let updated = store.get(&recipe.id).unwrap();
        assert_eq!(updated.name, "Bisque");
        assert_eq!(updated.tags, vec!["fancy"]);
        // Untouched fields survive the patch.
        assert_eq!(updated.ingredients, vec!["water"]);
        assert_eq!(updated.instructions, "Mix.");
        assert_eq!(updated.created_at, recipe.created_at);
    }

    #[test]
    fn test_update_can_clear_image() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let mut d = draft("Soup");
        d.image_url = Some("https://example.com/soup.jpg".to_string());
        let recipe = store.create(d);

        store.update(
            &recipe.id,
            RecipePatch {
                image_url: Some(None),
                ..Default::default()
            },
        );

        assert!(store.get(&recipe.id).unwrap().image_url.is_none());
    }

    #[test]
    fn test_update_unknown_id_is_silent_noop() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let recipe = store.create(draft("Soup"));

        store.update(
            "no-such-id",
            RecipePatch {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&recipe.id).unwrap().name, "Soup");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let a = store.create(draft("Soup"));
        let b = store.create(draft("Stew"));

        store.delete(&a.id);
        assert_eq!(store.len(), 1);

        store.delete(&a.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.recipes()[0].id, b.id);
    }

    #[test]
    fn test_deletions_preserve_order_of_survivors() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let ids: Vec<String> = ["A", "B", "C", "D"]
            .iter()
            .map(|name| store.create(draft(name)).id)
            .collect();

        store.delete(&ids[1]);

        let names: Vec<&str> = store.recipes().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_operation_sequence_keeps_ids_unique() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let mut live: Vec<String> = Vec::new();

        for i in 0..20 {
            let id = store.create(draft(&format!("Recipe {i}"))).id;
            if i % 3 == 0 {
                store.delete(&id);
            } else {
                live.push(id);
            }
        }

        assert_eq!(store.len(), live.len());
        let unique: HashSet<&str> = store.recipes().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(unique.len(), store.len());
        let order: Vec<&str> = store.recipes().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, live.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_mutation_writes_a_snapshot() {
        let mut store = RecipeStore::load(MemoryBackend::new());
        let recipe = store.create(draft("Soup"));

        let snapshot = |store: &RecipeStore<MemoryBackend>| {
            store.backend.payload(STORAGE_KEY).map(str::to_string)
        };
        let after_create = snapshot(&store).unwrap();
        assert!(after_create.contains("Soup"));

        store.update(
            &recipe.id,
            RecipePatch {
                name: Some("Bisque".to_string()),
                ..Default::default()
            },
        );
        assert!(snapshot(&store).unwrap().contains("Bisque"));

        store.delete(&recipe.id);
        assert_eq!(snapshot(&store).unwrap(), "[]");
    }

    struct FailingBackend;

    impl StorageBackend for FailingBackend {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _payload: &str) -> Result<(), StoreError> {
            Err(StoreError::Write(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }
    }

    #[test]
    fn test_write_failure_does_not_roll_back_memory() {
        let mut store = RecipeStore::load(FailingBackend);
        let recipe = store.create(draft("Soup"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&recipe.id).unwrap().name, "Soup");
    }
}
