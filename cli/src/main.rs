//! CLI entrypoint for llm-concierge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod formatter;
mod progress;

use anyhow::Result;
use args::{Cli, OutputFormat};
use clap::Parser;
use concierge_application::{ExecutionParams, HandleRequestInput, HandleRequestUseCase};
use concierge_infrastructure::{ConfigLoader, HttpBackendInvoker};
use formatter::ConsoleFormatter;
use progress::ConsoleProgress;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting llm-concierge");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow::anyhow!(e))?
    };
    let table = Arc::new(config.to_routing_table());
    let mut params: ExecutionParams = config.to_execution_params();
    if let Some(ms) = cli.deadline_ms {
        params = params.with_call_deadline(std::time::Duration::from_millis(ms.max(1)));
    }

    // === Dependency Injection ===
    // Create infrastructure adapter (HTTP gateway)
    let mut invoker = HttpBackendInvoker::new(&config.gateway.base_url, Arc::clone(&table));
    if let Some(env_name) = &config.gateway.api_key_env {
        if let Ok(key) = std::env::var(env_name) {
            invoker = invoker.with_api_key(key);
        }
    }

    let use_case = HandleRequestUseCase::new(Arc::new(invoker), table, params);

    // Cancel in-flight backend calls on Ctrl-C; partial results are
    // still assembled and printed.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let input = match &cli.context {
        Some(context) => HandleRequestInput::new(cli.question.clone()).with_context(context.clone()),
        None => HandleRequestInput::new(cli.question.clone()),
    };

    let output = if cli.quiet {
        use_case.handle(input, &cancel).await
    } else {
        use_case
            .handle_with_progress(input, &cancel, &ConsoleProgress)
            .await
    };

    let rendered = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&output),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&output),
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    println!("{}", rendered);

    if !output.result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
