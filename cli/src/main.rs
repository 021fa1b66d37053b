use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use restaurateur_core::{
    AppConfig, Cuisine, Dietary, FakeProvider, GenerationParams, GenerationRequest, MealType,
    RestaurantGenerator, RestaurantIdea, StageOutput, UNSET_SENTINEL,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restaurateur")]
#[command(about = "Generate a restaurant name, tagline and menu", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a restaurant idea (needs GROQ_API_KEY unless RESTAURATEUR_PROVIDER=fake)
    Generate {
        #[command(flatten)]
        selection: Selection,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available cuisines, meal types and dietary preferences
    Options,
    /// Print the prompts that would be sent, without calling the model
    Prompts {
        #[command(flatten)]
        selection: Selection,
    },
}

#[derive(Args)]
struct Selection {
    /// Cuisine, e.g. "Indian" or "Central African"
    #[arg(long)]
    cuisine: String,
    /// Meal type: appetizer, breakfast, lunch or dinner
    #[arg(long)]
    meal_type: String,
    /// Dietary preference, e.g. "Vegan"
    #[arg(long, default_value = UNSET_SENTINEL)]
    dietary: String,
}

impl Selection {
    fn to_request(&self) -> Result<GenerationRequest> {
        Ok(GenerationRequest::from_selections(
            &self.cuisine,
            &self.meal_type,
            &self.dietary,
        )?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { selection, json } => {
            generate(&selection.to_request()?, json).await?;
        }
        Commands::Options => {
            print_options();
        }
        Commands::Prompts { selection } => {
            print_prompts(&selection.to_request()?)?;
        }
    }

    Ok(())
}

async fn generate(request: &GenerationRequest, json: bool) -> Result<()> {
    // Validate before touching configuration so a bad selection never needs a key
    request.validate()?;

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::debug!(
        provider = ?config.provider,
        model = %config.model,
        temperature = config.temperature,
        max_retries = config.max_retries,
        "Configuration loaded"
    );
    let provider = config
        .build_provider()
        .context("Failed to create completion provider")?;
    let generator = RestaurantGenerator::new(provider, config.generation_params())?;

    let idea = generator.generate(request).await?;
    tracing::debug!(menu_len = idea.menu.len(), "Restaurant idea generated");

    if json {
        println!("{}", serde_json::to_string_pretty(&idea)?);
    } else {
        print_idea(&idea);
    }

    Ok(())
}

fn print_idea(idea: &RestaurantIdea) {
    println!("🍽️ Restaurant Name: {}", idea.restaurant_name.trim());
    println!("💬 Tagline: {}", idea.tagline.trim());
    println!("\n📜 Menu:\n{}", idea.menu);
}

fn print_options() {
    let join = |labels: Vec<&str>| labels.join(", ");
    println!(
        "Cuisines: {}",
        join(Cuisine::ALL.iter().map(Cuisine::label).collect())
    );
    println!(
        "Meal types: {}",
        join(MealType::ALL.iter().map(MealType::label).collect())
    );
    println!(
        "Dietary preferences: {}",
        join(Dietary::ALL.iter().map(Dietary::label).collect())
    );
}

fn print_prompts(request: &GenerationRequest) -> Result<()> {
    // The provider is never called when only rendering
    let generator =
        RestaurantGenerator::new(Arc::new(FakeProvider::new()), GenerationParams::default())?;

    for (output, prompt) in generator.render_prompts(request)? {
        let title = match output {
            StageOutput::RestaurantName => "Name prompt",
            StageOutput::Tagline => "Tagline prompt",
            StageOutput::Menu => "Menu prompt",
        };
        println!("{}:\n{}\n", title, prompt);
    }

    Ok(())
}
