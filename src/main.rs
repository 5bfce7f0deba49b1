use std::io::{self, BufRead, Write};

use recipe_keeper::{
    AppConfig, FileBackend, FilterOutcome, OpenAiClient, Recipe, RecipeDraft, RecipeStore,
    Session, SuggestionState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_default();
    let client = OpenAiClient::from_config(&config)?;
    let store = RecipeStore::load(FileBackend::new(&config.data_dir));
    let mut session = Session::new(store, Box::new(client));

    println!("recipe-keeper - type 'help' for commands");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {}
            "help" => print_help(),
            "list" => print_visible(&session),
            "tags" => {
                for tag in session.tags() {
                    println!("  {tag}");
                }
            }
            "add" => {
                let draft = read_draft(&stdin, None)?;
                match session.add_recipe(draft) {
                    Ok(recipe) => println!("Added \"{}\" ({})", recipe.name, recipe.id),
                    Err(err) => println!("{err}"),
                }
            }
            "edit" => match session.recipe(rest).cloned() {
                Some(existing) => {
                    let draft = read_draft(&stdin, Some(&existing))?;
                    match session.edit_recipe(rest, draft) {
                        Ok(()) => println!("Updated \"{rest}\""),
                        Err(err) => println!("{err}"),
                    }
                }
                None => println!("No recipe with id {rest}"),
            },
            "delete" => {
                session.delete_recipe(rest);
                print_counts(&session);
            }
            "search" => {
                session.set_search(rest);
                print_visible(&session);
            }
            "tag" => {
                session.set_tag(rest);
                print_visible(&session);
            }
            "key" => {
                if rest.is_empty() {
                    session.clear_api_key();
                    println!("API key cleared");
                } else {
                    session.set_api_key(rest);
                    println!("API key configured! AI features are ready.");
                }
            }
            "suggest" => {
                match session.suggest(rest).await {
                    SuggestionState::Succeeded(text) => println!("{text}"),
                    SuggestionState::Failed(message) => println!("{message}"),
                    _ => {}
                }
            }
            "quit" | "exit" => break,
            other => println!("Unknown command '{other}', type 'help'"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("  list                show recipes under the current filter");
    println!("  add                 add a recipe (prompts for fields)");
    println!("  edit <id>           re-enter all fields of a recipe");
    println!("  delete <id>         delete a recipe");
    println!("  search <text>       filter by name or ingredient (empty clears)");
    println!("  tag <tag>           filter by exact tag (empty clears)");
    println!("  tags                list all tags");
    println!("  key [api-key]       set or clear the OpenAI API key");
    println!("  suggest <items>     ask for 3 recipe ideas from ingredients");
    println!("  quit");
}

fn print_visible<B: recipe_keeper::StorageBackend>(session: &Session<B>) {
    match session.visible() {
        FilterOutcome::NoRecipes => {
            println!("No recipes yet. Add your first recipe to get started!");
        }
        FilterOutcome::NoMatches => {
            println!("No recipes match your search criteria.");
        }
        FilterOutcome::Matches(recipes) => {
            for recipe in recipes {
                let tags = if recipe.tags.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", recipe.tags.join(", "))
                };
                println!("  {}  {}{tags}", recipe.id, recipe.name);
            }
        }
    }
    print_counts(session);
}

fn print_counts<B: recipe_keeper::StorageBackend>(session: &Session<B>) {
    let (visible, total) = session.counts();
    println!("Showing {visible} of {total} recipes");
}

fn prompt(stdin: &io::Stdin, label: &str, existing: Option<&str>) -> io::Result<String> {
    match existing {
        Some(current) => print!("{label} [{current}]: "),
        None => print!("{label}: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    let line = line.trim();

    // Keep the current value when editing and the line is left blank.
    Ok(match existing {
        Some(current) if line.is_empty() => current.to_string(),
        _ => line.to_string(),
    })
}

fn read_draft(stdin: &io::Stdin, existing: Option<&Recipe>) -> io::Result<RecipeDraft> {
    let name = prompt(stdin, "Name", existing.map(|r| r.name.as_str()))?;
    let ingredients = prompt(
        stdin,
        "Ingredients (comma separated)",
        existing.map(|r| r.ingredients.join(", ")).as_deref(),
    )?;
    let instructions = prompt(stdin, "Instructions", existing.map(|r| r.instructions.as_str()))?;
    let tags = prompt(
        stdin,
        "Tags (comma separated)",
        existing.map(|r| r.tags.join(", ")).as_deref(),
    )?;
    let image_url = prompt(
        stdin,
        "Image URL (optional)",
        existing.and_then(|r| r.image_url.as_deref()),
    )?;

    Ok(RecipeDraft {
        name,
        ingredients: split_list(&ingredients),
        instructions,
        tags: split_list(&tags),
        image_url: (!image_url.is_empty()).then_some(image_url),
    })
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
