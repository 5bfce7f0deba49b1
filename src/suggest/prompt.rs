/// Build the fixed instruction the suggestion cycle submits: always three
/// recipes, each with a short description, as display-ready numbered text.
pub fn suggestion_prompt(ingredients: &str) -> String {
    format!(
        "Given these ingredients: {ingredients}, suggest 3 recipes I can make. \
         For each recipe, provide the name and a brief description (2-3 sentences). \
         Format the response clearly with numbered recipes."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_raw_ingredient_text() {
        let prompt = suggestion_prompt("chicken, rice, tomatoes");
        assert!(prompt.starts_with("Given these ingredients: chicken, rice, tomatoes,"));
        assert!(prompt.contains("suggest 3 recipes"));
        assert!(prompt.contains("numbered recipes"));
    }
}
