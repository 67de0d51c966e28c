//! Adventure agent binary - a text stand-in for the voice pipeline.
//!
//! Reads one JSON tool call per line on stdin and writes one JSON reply per
//! line on stdout. Logs go to stderr so they never mix with replies.

mod config;
mod driver;

use adventure_core::{AdventureEngine, ToolRegistry};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::driver::ConversationDriver;

fn resolve_config_path() -> (String, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (path, "cli-arg");
    }

    if let Ok(path) = std::env::var("ADVENTURE_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (path, "env-var");
        }
    }

    ("adventure.toml".to_string(), "default")
}

fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config_path, config_source) = resolve_config_path();
    let config = config::load_config(Some(&config_path))?;

    init_tracing(&config.logging);
    tracing::info!(
        source = config_source,
        path = %config_path,
        "resolved startup configuration path"
    );

    let catalog = config.catalog.load()?;
    tracing::info!(
        scenes = catalog.len(),
        entry = %catalog.entry(),
        "scene catalog ready"
    );

    let engine = AdventureEngine::new(Arc::new(catalog), config.engine.clone());
    let mut driver = ConversationDriver::new(ToolRegistry::new(engine));
    tracing::info!(
        tools = driver.registry().definitions().len(),
        "adventure agent listening on stdin"
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = driver.handle_line(&line);
        serde_json::to_writer(&mut stdout, &reply)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }

    tracing::info!(
        open_conversations = driver.conversation_count(),
        "stdin closed, shutting down"
    );
    Ok(())
}
