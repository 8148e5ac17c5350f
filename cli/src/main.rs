mod interactive;
mod render;
mod terminal_share;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chef_core::ingredient_validator::{validate_addition, validate_for_recipe, validate_name};
use chef_core::llm::create_provider_from_env;
use chef_core::share::{format_recipe_for_sharing, ShareStyle};
use chef_core::{
    generate_recipe, parse_recipe_response, CookingStyle, DietType, Language, RecipeDepth,
    RecipeParams,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "chef")]
#[command(about = "Chef Al-Smart recipe wizard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive recipe wizard (default)
    Wizard {
        /// Write copied recipes to this file instead of printing them
        #[arg(long)]
        clipboard_file: Option<PathBuf>,
    },
    /// Generate one recipe without the wizard
    Generate {
        /// Diet type: vegetarian or non-vegetarian
        #[arg(long, default_value = "vegetarian")]
        diet: DietType,
        /// Main ingredient (repeat for several)
        #[arg(long = "ingredient", short = 'i', required = true)]
        ingredients: Vec<String>,
        /// Cooking style: home or restaurant
        #[arg(long, default_value = "home")]
        style: CookingStyle,
        /// Recipe detail: quick or detailed
        #[arg(long, default_value = "detailed")]
        depth: RecipeDepth,
        /// Recipe language: english or hinglish
        #[arg(long, default_value = "english")]
        language: Language,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Parse a saved model response into a recipe
    Parse {
        /// File holding the raw response text
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable recipe card
    Text,
    /// Recipe as JSON
    Json,
    /// Plain share text
    Share,
}

fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Wizard {
        clipboard_file: None,
    }) {
        Commands::Wizard { clipboard_file } => {
            let provider = create_provider_from_env()
                .context("Cannot start the wizard without an OpenRouter API key")?;
            interactive::run(Arc::new(provider), clipboard_file).await?;
        }
        Commands::Generate {
            diet,
            ingredients,
            style,
            depth,
            language,
            format,
        } => {
            let params = RecipeParams {
                ingredients: checked_ingredients(&ingredients, diet)?,
                diet_type: diet,
                cooking_style: style,
                recipe_depth: depth,
                language,
            };
            generate(params, format).await?;
        }
        Commands::Parse { file, format } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let recipe = parse_recipe_response(&text);
            match format {
                OutputFormat::Text => print!("{}", render::recipe_card(&recipe)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recipe)?),
                OutputFormat::Share => {
                    print!("{}", format_recipe_for_sharing(&recipe, ShareStyle::Plain))
                }
            }
        }
    }

    Ok(())
}

/// Apply the same rules the wizard applies while the list is built.
fn checked_ingredients(raw: &[String], diet: DietType) -> Result<Vec<String>> {
    let mut ingredients = Vec::new();
    for item in raw {
        let name = validate_name(item).with_context(|| format!("Invalid ingredient '{item}'"))?;
        validate_addition(&name, &ingredients, diet)
            .with_context(|| format!("Cannot add '{name}'"))?;
        ingredients.push(name);
    }
    validate_for_recipe(&ingredients)?;
    Ok(ingredients)
}

async fn generate(params: RecipeParams, format: OutputFormat) -> Result<()> {
    let provider = create_provider_from_env()?;

    let generated = generate_recipe(&provider, &params)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;

    match format {
        OutputFormat::Text => print!("{}", render::recipe_card(&generated.recipe)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&generated)?),
        OutputFormat::Share => print!(
            "{}",
            format_recipe_for_sharing(&generated.recipe, ShareStyle::Plain)
        ),
    }

    Ok(())
}
