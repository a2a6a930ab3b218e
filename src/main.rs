use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use ember::classifier::linear::LinearClassifier;
use ember::classifier::traits::Classifier;
use ember::config::{Config, TitleBackend};
use ember::keywords::blend::BlendedExtractor;
use ember::keywords::traits::KeywordExtractor;
use ember::recommend;
use ember::reference::ReferenceSet;
use ember::scoring::relevance::{self, RelevanceWeights};
use ember::titles::gemini::GeminiTitleGenerator;
use ember::titles::template::TemplateTitleGenerator;
use ember::titles::traits::TitleGenerator;
use ember::web::{self, AppState};

/// Ember: board classification and hot keyword recommendation.
///
/// Predicts which board a Dcard-style post belongs to, suggests titles,
/// and recommends hot keywords to tag the post with.
#[derive(Parser)]
#[command(name = "ember", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the prediction API server
    Serve {
        /// Port to listen on (overrides EMBER_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides EMBER_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Run the full pipeline on a single post and print the result
    Analyze {
        /// The post text
        text: String,
    },

    /// Extract keywords and recommend hot keywords without classifying
    Keywords {
        /// The post text
        text: String,

        /// Board to rank against (unknown labels use the general list)
        #[arg(long, default_value = "talk")]
        board: String,

        /// Max keywords to extract from the text
        #[arg(long, default_value = "15")]
        extracted: usize,

        /// Max hot keywords to recommend
        #[arg(long, default_value = "5")]
        recommended: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ember=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            config.require_model()?;
            config.require_titles()?;

            let state = build_state(&config)?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());

            web::run_server(state, port, &bind).await?;
        }

        Commands::Analyze { text } => {
            let config = Config::load()?;
            config.require_model()?;

            let classifier = LinearClassifier::load(&config.model_path)?;
            let reference = load_reference(&config)?;
            let extractor = BlendedExtractor::new();
            let titles = build_title_generator(&config)?;

            let prediction = classifier.predict(&text)?;
            info!(
                category = prediction.category.label(),
                "Classified post"
            );

            let suggested = titles.suggest(&text, prediction.category, 3).await?;

            let outcome = recommend::generate_recommendations(
                &extractor,
                &reference,
                &text,
                prediction.category.label(),
                15,
                5,
            );
            let (recommendations, degraded_reason) = outcome.into_parts();

            ember::output::terminal::display_prediction(
                &prediction,
                &suggested,
                &recommendations,
                degraded_reason.as_deref(),
            );
        }

        Commands::Keywords {
            text,
            board,
            extracted,
            recommended,
        } => {
            let config = Config::load()?;
            let reference = load_reference(&config)?;
            let extractor = BlendedExtractor::new();

            let keywords = extractor.extract(&text, extracted)?;
            let hot = relevance::rank(
                &reference,
                &board,
                &keywords,
                recommended,
                &RelevanceWeights::default(),
            );

            ember::output::terminal::display_weighted_keywords(&keywords, &hot);

            if keywords.is_empty() {
                println!(
                    "{}",
                    "提示：文章內容太短時，推薦結果會以熱門度排序。".dimmed()
                );
            }
        }
    }

    Ok(())
}

/// Build the shared server state: classifier, extractor, reference tables,
/// title generator. Everything loads once here.
fn build_state(config: &Config) -> Result<AppState> {
    let classifier = LinearClassifier::load(&config.model_path)?;
    let reference = load_reference(config)?;
    let titles = build_title_generator(config)?;

    Ok(AppState {
        classifier: Arc::new(classifier),
        extractor: Arc::new(BlendedExtractor::new()),
        reference: Arc::new(reference),
        titles,
    })
}

fn load_reference(config: &Config) -> Result<ReferenceSet> {
    match &config.reference_path {
        Some(path) => ReferenceSet::load(path),
        None => ReferenceSet::embedded(),
    }
}

fn build_title_generator(config: &Config) -> Result<Arc<dyn TitleGenerator>> {
    match config.title_backend {
        TitleBackend::Gemini => {
            config.require_gemini()?;
            Ok(Arc::new(GeminiTitleGenerator::new(
                config.gemini_api_key.clone(),
            )))
        }
        TitleBackend::Template => {
            info!("No Gemini API key configured, using the local title generator");
            Ok(Arc::new(TemplateTitleGenerator::new()))
        }
    }
}
