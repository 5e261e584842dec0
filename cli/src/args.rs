//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for routed results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output: triage, plan, every agent response
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

/// CLI arguments for llm-concierge
#[derive(Parser, Debug)]
#[command(name = "llm-concierge")]
#[command(author, version, about = "Triage and multi-model collaboration router")]
#[command(long_about = r#"
llm-concierge classifies each request and routes it to the cheapest
viable backend, escalating to a sequential chain or a parallel ensemble
with consensus synthesis when the request warrants it.

The process has four stages:
1. Classification: complexity, domain, urgency, output shape and tone
2. Strategy selection: single call, chain, or ensemble
3. Execution: backend calls with retry and rate-limit fallback
4. Enhancement: presentation hints applied to the final answer

Configuration files are loaded from (in priority order):
1. CONCIERGE_* environment variables
2. --config <path>       Explicit config file
3. ./concierge.toml      Project-level config
4. ~/.config/llm-concierge/config.toml   Global config

Example:
  llm-concierge "What are your office hours?"
  llm-concierge --context "clinical deployment" "Interpret these lab results"
  llm-concierge -o json "Compare async runtimes"
"#)]
pub struct Cli {
    /// The request to triage and route
    pub question: String,

    /// Free-text hint about the operating context
    #[arg(short = 'x', long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Per-call deadline in milliseconds, overriding the config file
    #[arg(long, value_name = "MS")]
    pub deadline_ms: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "answer")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}
