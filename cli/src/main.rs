//! CLI entrypoint for macrolens
//!
//! Wires the layers together with explicit dependency injection: one
//! Gemini gateway built from configuration, passed into every use case.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::{Parser, Subcommand};
use macrolens_application::{GenerateStructuredUseCase, RunConsensusUseCase};
use macrolens_domain::{
    GenerationError, GenerationRequest, MealAnalysis, PromptPayload, PromptTemplate, WorkoutPlan,
};
use macrolens_infrastructure::{ConfigLoader, FileConfig, GeminiConfig, GeminiGateway};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "macrolens", version, about = "Nutrition and workout analysis via Gemini")]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Explicit config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ignore config files, use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a meal described in free text
    Meal {
        /// Meal description, e.g. "2 chapatis and dal"
        description: String,

        /// Number of consensus samples (default from config)
        #[arg(long)]
        samples: Option<usize>,
    },
    /// Analyze a meal from a photo
    MealImage {
        /// Path to the image file (jpeg, png or webp)
        path: PathBuf,

        /// Number of consensus samples (default from config)
        #[arg(long)]
        samples: Option<usize>,
    },
    /// Generate a workout plan
    Workout {
        /// Training goal
        #[arg(long, default_value = "general fitness")]
        goal: String,

        /// Experience level
        #[arg(long, default_value = "beginner")]
        level: String,

        /// Training days per week
        #[arg(long, default_value_t = 3)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let Some(api_key) = config.api_key.clone() else {
        bail!("No API key configured. Set GEMINI_API_KEY or api_key in macrolens.toml.");
    };

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiGateway::new(GeminiConfig::new(api_key, config.model.clone())));

    match cli.command {
        Command::Meal { description, samples } => {
            let request = build_request(&config, PromptPayload::text(PromptTemplate::meal_text(&description)));
            analyze_meal(gateway, &config, request, samples, &description).await
        }
        Command::MealImage { path, samples } => {
            let payload = image_payload(&path)?;
            let request = build_request(&config, payload);
            let label = path.display().to_string();
            analyze_meal(gateway, &config, request, samples, &label).await
        }
        Command::Workout { goal, level, days } => {
            let request =
                build_request(&config, PromptPayload::text(PromptTemplate::workout(&goal, &level, days)));
            generate_workout(gateway, request).await
        }
    }
}

fn build_request(config: &FileConfig, payload: PromptPayload) -> GenerationRequest {
    GenerationRequest::new(payload)
        .with_params(config.generation_params())
        .with_retry(config.retry_policy())
}

/// Read an image file into an inline base64 part.
fn image_payload(path: &Path) -> Result<PromptPayload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };

    Ok(PromptPayload::multimodal(
        PromptTemplate::meal_image(),
        BASE64.encode(bytes),
        mime,
    ))
}

async fn analyze_meal(
    gateway: Arc<GeminiGateway>,
    config: &FileConfig,
    request: GenerationRequest,
    samples: Option<usize>,
    described_as: &str,
) -> Result<()> {
    let samples = samples.unwrap_or(config.consensus.samples);
    let use_case = RunConsensusUseCase::new(gateway);

    let meal = match use_case
        .execute_typed::<MealAnalysis>(
            &request,
            &MealAnalysis::shape(),
            &MealAnalysis::merge_plan(),
            samples,
        )
        .await
    {
        Ok(meal) => meal,
        Err(GenerationError::Auth(msg)) => bail!("authentication failed: {msg}"),
        Err(e) => {
            warn!("meal analysis failed ({e}), using fallback");
            MealAnalysis::fallback(described_as)
        }
    };

    info!(food = %meal.food_name, "meal analysis complete");
    println!("{}", serde_json::to_string_pretty(&meal)?);
    Ok(())
}

async fn generate_workout(gateway: Arc<GeminiGateway>, request: GenerationRequest) -> Result<()> {
    let use_case = GenerateStructuredUseCase::new(gateway);

    let plan = match use_case
        .execute_typed::<WorkoutPlan>(&request, &WorkoutPlan::shape())
        .await
    {
        Ok(plan) => plan,
        Err(GenerationError::Auth(msg)) => bail!("authentication failed: {msg}"),
        Err(e) => {
            warn!("workout generation failed ({e}), using fallback");
            WorkoutPlan::fallback()
        }
    };

    info!(plan = %plan.plan_name, "workout generation complete");
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
