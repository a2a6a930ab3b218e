use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Which title generation backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleBackend {
    /// Gemini generateContent API — requires GEMINI_API_KEY
    Gemini,
    /// Local template-based generator — deterministic, no API key needed
    Template,
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Gemini API key for title generation (empty = use templates)
    pub gemini_api_key: String,
    /// Path to the classifier artifact (JSON export of the trained model)
    pub model_path: PathBuf,
    /// Optional override for the popularity tables; defaults to the
    /// embedded dataset when unset
    pub reference_path: Option<PathBuf>,
    /// Which title generator to use (default: Gemini when a key is set)
    pub title_backend: TitleBackend,
    pub bind: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the Gemini key, which is only
    /// required when the Gemini title backend is forced.
    pub fn load() -> Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();

        let title_backend = match env::var("EMBER_TITLES").as_deref() {
            Ok("template") => TitleBackend::Template,
            Ok("gemini") => TitleBackend::Gemini,
            // Unset: use Gemini when a key is available, templates otherwise
            _ if !gemini_api_key.is_empty() => TitleBackend::Gemini,
            _ => TitleBackend::Template,
        };

        let model_path = env::var("EMBER_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./model/classifier.json"));

        let port = match env::var("EMBER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("EMBER_PORT is not a valid port number: {raw}"))?,
            Err(_) => 5000,
        };

        Ok(Self {
            gemini_api_key,
            model_path,
            reference_path: env::var("EMBER_REFERENCE_PATH").ok().map(PathBuf::from),
            title_backend,
            bind: env::var("EMBER_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
        })
    }

    /// Check that the classifier artifact exists.
    /// Call this before any operation that needs board prediction.
    pub fn require_model(&self) -> Result<()> {
        if !self.model_path.exists() {
            anyhow::bail!(
                "Classifier artifact not found at {}\n\
                 Export the trained model to JSON and point EMBER_MODEL_PATH at it.\n\
                 See .env.example for the required variables.",
                self.model_path.display()
            );
        }
        Ok(())
    }

    /// Check that the Gemini API key is configured.
    /// Call this before starting anything that uses the Gemini title backend.
    pub fn require_gemini(&self) -> Result<()> {
        if self.gemini_api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set but EMBER_TITLES=gemini was requested.\n\
                 Add the key to your .env file, or set EMBER_TITLES=template\n\
                 to use the local title generator instead."
            );
        }
        Ok(())
    }

    /// Validate that the chosen title backend has what it needs.
    pub fn require_titles(&self) -> Result<()> {
        match self.title_backend {
            TitleBackend::Gemini => self.require_gemini(),
            TitleBackend::Template => Ok(()),
        }
    }
}
