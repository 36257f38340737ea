use std::env;
use std::io::Write;

use log::{debug, error};
use recipe_finder::{
    DetailScreen, FinderConfig, MeasureSystem, RecipeFinder, Screen, SearchResults, SearchScreen,
    Session, SpoonacularClient,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  add <ingredient>   add an ingredient
  remove <n>         remove ingredient number n
  list               show the current screen again
  search             find recipes using your ingredients
  open <n>           show recipe number n
  back               return to the recipe list
  help               show this help
  quit               exit";

#[derive(Debug, PartialEq)]
enum Command {
    Add(String),
    Remove(usize),
    List,
    Search,
    Open(usize),
    Back,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "add" | "a" => Command::Add(rest.to_string()),
        "remove" | "rm" => match rest.parse() {
            Ok(n) => Command::Remove(n),
            Err(_) => Command::Unknown(line.to_string()),
        },
        "list" | "ls" | "" => Command::List,
        "search" | "s" => Command::Search,
        "open" | "o" => match rest.parse() {
            Ok(n) => Command::Open(n),
            Err(_) => Command::Unknown(line.to_string()),
        },
        "back" | "b" => Command::Back,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

fn render(session: &Session, measure_system: MeasureSystem) {
    match session.screen() {
        Screen::Search(screen) => render_search(&screen),
        Screen::Detail(screen) => render_detail(&screen, measure_system),
    }
}

fn render_search(screen: &SearchScreen<'_>) {
    println!();
    if screen.ingredients.is_empty() {
        println!("Ingredients: (none yet)");
    } else {
        println!("Ingredients:");
        for (i, ingredient) in screen.ingredients.iter().enumerate() {
            println!("  {}. {}", i + 1, ingredient);
        }
    }

    if let Some(error) = screen.error {
        println!("! {}", error);
    }

    match &screen.results {
        SearchResults::NotSearched => {}
        SearchResults::Loading => println!("Finding delicious recipes for you..."),
        SearchResults::NoneFound => println!(
            "No recipes found with these ingredients. Try adding different ingredients."
        ),
        SearchResults::Recipes(cards) => {
            println!("Recipes:");
            for (i, card) in cards.iter().enumerate() {
                println!("  {}. {}", i + 1, card.title);
                match &card.missed_label {
                    Some(missed) => println!("     {} | {}", card.used_label, missed),
                    None => println!("     {}", card.used_label),
                }
                if !card.used_preview.is_empty() {
                    println!("     have: {}", card.used_preview.join(", "));
                }
                if !card.missed_preview.is_empty() {
                    println!("     need: {}", card.missed_preview.join(", "));
                }
            }
        }
    }

    if let Some(id) = screen.loading_recipe {
        println!("Loading recipe details for {}...", id);
    }
}

fn render_detail(screen: &DetailScreen<'_>, measure_system: MeasureSystem) {
    let detail = screen.detail;
    println!();
    println!("<- back to recipes");
    println!("{}", detail.title);
    println!(
        "{} mins | {} servings",
        detail.ready_in_minutes, detail.servings
    );
    if !detail.image.is_empty() {
        println!("{}", detail.image);
    }

    let summary = screen.summary_text();
    if !summary.is_empty() {
        println!();
        println!("{}", summary);
    }

    println!();
    println!("Ingredients");
    for line in screen.ingredient_lines(measure_system) {
        println!("  - {}", line);
    }

    println!();
    println!("Instructions");
    for line in screen.instruction_lines() {
        println!("  {}", line);
    }
}

async fn run_command(
    command: Command,
    session: &mut Session,
    client: &SpoonacularClient,
) -> bool {
    match command {
        Command::Add(text) => {
            session.set_input(text);
            if !session.submit_input() {
                println!("Type an ingredient after 'add'");
            }
        }
        Command::Remove(n) => {
            if n >= 1 && n <= session.ingredients().len() {
                session.remove_ingredient(n - 1);
            } else {
                println!("There is no ingredient {}", n);
            }
        }
        Command::Search => {
            if session.detail().is_some() {
                session.go_back();
            }
            // Failures are part of the session state and get rendered
            if let Err(e) = session.search(client).await {
                debug!("Search not started: {}", e);
            }
        }
        Command::Open(n) => {
            if session.detail().is_some() {
                println!("Go back to the recipe list first");
                return true;
            }
            let Some(id) = n
                .checked_sub(1)
                .and_then(|i| session.summaries().get(i))
                .map(|summary| summary.id)
            else {
                println!("There is no recipe {}", n);
                return true;
            };
            if let Err(e) = session.select_recipe(id, client).await {
                debug!("Recipe {} not loaded: {}", id, e);
            }
        }
        Command::Back => session.go_back(),
        Command::List => {}
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
        Command::Unknown(line) => {
            println!("Unknown command '{}'. Type 'help' for a list.", line);
            return true;
        }
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = FinderConfig::load()?;
    let measure_system = config.measure_system;
    let client = RecipeFinder::builder().config(config).build().map_err(|e| {
        error!("Unable to create the recipe client: {}", e);
        e
    })?;

    let mut session = Session::new();
    // Ingredients may also be passed as arguments
    for arg in env::args().skip(1) {
        session.add_ingredient(&arg);
    }

    println!("Smart Recipe Assistant");
    println!("Find delicious recipes with ingredients you have on hand");
    println!("{}", HELP);
    render(&session, measure_system);

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = parse_command(&line);
        let redraw = !matches!(command, Command::Help | Command::Unknown(_));
        if !run_command(command, &mut session, &client).await {
            break;
        }
        if redraw {
            render(&session, measure_system);
        }
    }

    Ok(())
}
