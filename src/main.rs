//! MatchIntel - AI-powered sports matchup analyst
//!
//! A CLI tool that sends a matchup description to Gemini with web-search
//! grounding, parses the templated response into typed sections, and
//! writes a report with cited sources.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (validation, connection, config, write failure)

mod cli;
mod config;
mod error;
mod llm;
mod models;
mod parse;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use error::PredictionError;
use indicatif::{ProgressBar, ProgressStyle};
use llm::{GeminiClient, GeminiConfig};
use models::{MatchQuery, Report, ReportMetadata};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments; a blank match description is rejected here,
    // before any client exists or any request is made
    if let Err(e) = args.validate().map_err(PredictionError::Validation) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("MatchIntel v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the analysis
    match run_analysis(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .matchintel.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".matchintel.toml");

    if path.exists() {
        eprintln!("⚠️  .matchintel.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .matchintel.toml")?;

    println!("✅ Created .matchintel.toml with default settings.");
    println!("   Edit it to customize model, endpoint, and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete analysis workflow.
async fn run_analysis(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let query = MatchQuery::new(args.match_info());

    // Handle --dry-run: show the outbound prompt and exit
    if args.dry_run {
        return handle_dry_run(&query);
    }

    println!("🤖 Requesting matchup analysis...");
    println!("   Match: {}", query.as_str());
    println!("   Model: {}", config.model.name);
    println!("   Timeout: {}s", config.model.timeout_seconds);

    let client = GeminiClient::new(GeminiConfig {
        api_url: config.model.api_url.clone(),
        api_key: args.api_key.clone().unwrap_or_default(),
        model_name: config.model.name.clone(),
        timeout_seconds: config.model.timeout_seconds,
    });

    // The API round-trip is the sole wait in the whole run
    let spinner = make_spinner(args.quiet);
    let result = llm::request_prediction(&client, &query).await;
    spinner.finish_and_clear();

    let mut prediction = result?;

    if !config.report.include_sources {
        prediction.sources.clear();
    }

    // Build the report
    println!("\n📝 Generating report...");

    let metadata = ReportMetadata {
        match_info: query.as_str().to_string(),
        analysis_date: Utc::now(),
        model_used: config.model.name.clone(),
        source_count: prediction.sources.len(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };

    let report = Report {
        metadata,
        prediction,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(&args.output, &output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    // Print the verdict summary
    if config.report.print_summary && !args.quiet {
        print_summary(&report);
    }

    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        args.output.display()
    );

    Ok(())
}

/// Handle --dry-run: print the prompt that would be sent, make no calls.
fn handle_dry_run(query: &MatchQuery) -> Result<()> {
    println!("\n🔍 Dry run: no API call will be made.\n");
    println!("Outbound prompt:");
    println!("   {}", llm::prompt::build_user_prompt(query.as_str()));
    println!(
        "\nSystem instruction: {} chars (fixed template)",
        llm::prompt::ANALYST_SYSTEM_PROMPT.len()
    );
    println!("\n✅ Dry run complete.");
    Ok(())
}

/// Spinner shown while the request is in flight.
fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("Invalid spinner template"),
    );
    spinner.set_message("Researching matchup and running the checklist...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the verdict summary to the terminal.
fn print_summary(report: &Report) {
    let parsed = &report.prediction.report;

    println!("\n📊 Verdict Summary:");
    if let Some(ref best_bets) = parsed.best_bets {
        println!("   🎯 Best Bet(s): {}", best_bets);
    }
    if let Some(ref confidence) = parsed.confidence_score {
        println!("   🔥 Confidence: {}", confidence);
    }
    if let Some(ref staking) = parsed.staking_plan {
        println!("   📊 Staking Plan: {}", staking);
    }
    if let Some(ref red_flags) = parsed.red_flags {
        println!("   ⚠️  Red Flags: {}", red_flags);
    }
    if parsed.best_bets.is_none() && parsed.confidence_score.is_none() {
        println!("   (no verdict block in the response; see the full analysis)");
    }
    println!("   Sources: {}", report.prediction.sources.len());
    println!("   Duration: {:.1}s", report.metadata.duration_seconds);
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .matchintel.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
