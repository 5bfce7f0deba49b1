//! Pure query logic over the recipe collection: free-text search, exact-tag
//! filtering, and the tag universe the tag picker is populated from.

use crate::model::Recipe;

/// The two user-supplied predicates. Both empty means everything is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Case-insensitive substring matched against name and ingredients.
    pub search: String,
    /// Case-sensitive exact match against the recipe's tag set.
    pub tag: String,
}

impl RecipeFilter {
    pub fn new(search: impl Into<String>, tag: impl Into<String>) -> Self {
        RecipeFilter {
            search: search.into(),
            tag: tag.into(),
        }
    }

    /// A recipe is visible iff both predicates hold. Tags are deliberately
    /// excluded from the text search; they have their own exact filter.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_text(recipe) && self.matches_tag(recipe)
    }

    fn matches_text(&self, recipe: &Recipe) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        recipe.name.to_lowercase().contains(&needle)
            || recipe
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }

    fn matches_tag(&self, recipe: &Recipe) -> bool {
        self.tag.is_empty() || recipe.tags.iter().any(|tag| *tag == self.tag)
    }
}

/// Result of filtering, distinguishing "nothing exists yet" from "nothing
/// matched" so the two can be presented differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    /// The collection itself is empty.
    NoRecipes,
    /// Recipes exist but none match the current filter.
    NoMatches,
    /// Matching recipes in collection order.
    Matches(Vec<&'a Recipe>),
}

impl<'a> FilterOutcome<'a> {
    pub fn recipes(&self) -> &[&'a Recipe] {
        match self {
            FilterOutcome::Matches(recipes) => recipes,
            _ => &[],
        }
    }
}

/// Apply the filter, preserving collection order.
pub fn visible<'a>(recipes: &'a [Recipe], filter: &RecipeFilter) -> FilterOutcome<'a> {
    if recipes.is_empty() {
        return FilterOutcome::NoRecipes;
    }

    let matches: Vec<&Recipe> = recipes.iter().filter(|r| filter.matches(r)).collect();
    if matches.is_empty() {
        FilterOutcome::NoMatches
    } else {
        FilterOutcome::Matches(matches)
    }
}

/// Every distinct tag across the collection, case-sensitive, sorted
/// lexicographically ascending.
pub fn tag_universe(recipes: &[Recipe]) -> Vec<String> {
    let mut tags: Vec<String> = recipes
        .iter()
        .flat_map(|recipe| recipe.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
