//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// MatchIntel - LLM-powered sports matchup analyst
///
/// Get an elite tactical and statistical breakdown of any matchup using
/// Gemini with web-search grounding. Markdown/JSON reports. Built in Rust.
///
/// Examples:
///   matchintel "Arsenal vs Chelsea, Premier League, Saturday"
///   matchintel "Lakers vs Celtics" --model gemini-2.5-pro --format json
///   matchintel "Real Madrid vs Barcelona" --dry-run
///   matchintel --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Free-text matchup description to analyze
    ///
    /// Teams, competition, date, venue - anything that identifies the game.
    /// Not required when using --init-config.
    #[arg(value_name = "MATCH", required_unless_present = "init_config")]
    pub match_info: Option<String>,

    /// Gemini model to use for analysis
    #[arg(
        short,
        long,
        default_value = "gemini-2.5-flash",
        env = "MATCHINTEL_MODEL"
    )]
    pub model: String,

    /// Gemini API endpoint URL
    #[arg(
        long,
        default_value = "https://generativelanguage.googleapis.com",
        env = "GEMINI_API_URL"
    )]
    pub api_url: String,

    /// Gemini API key
    ///
    /// Usually supplied via the GEMINI_API_KEY environment variable.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output file path for the report
    #[arg(
        short,
        long,
        default_value = "matchintel_report.md",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Request timeout in seconds
    ///
    /// How long to wait for the model to respond. Grounded generation can
    /// take a while. Default: from config or 120s.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .matchintel.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: build and print the outbound prompt without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .matchintel.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the matchup description, empty if not set.
    pub fn match_info(&self) -> &str {
        self.match_info.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    ///
    /// The blank-match check here is the validation gate: it runs before
    /// any client is built, so a rejected query never reaches the network.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.match_info().trim().is_empty() {
            return Err("Please enter match information.".to_string());
        }

        // API access is not needed for dry-run
        if !self.dry_run {
            if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }

            if self.api_key.as_deref().unwrap_or("").is_empty() {
                return Err(
                    "No API key. Set GEMINI_API_KEY or pass --api-key.".to_string()
                );
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
