use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use vizquiz::config::Config;
use vizquiz::engine::LlmEngineFactory;
use vizquiz::server::{init_tracing, QuizServer};

#[derive(Debug, Parser)]
#[command(name = "vizquiz", version, about = "Visual question generator")]
struct Cli {
    /// Path to the config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding `server.bind_addr`
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(bind) = &cli.bind {
        config.server.bind_addr = bind.clone();
        config.validate().context("Invalid --bind address")?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli)?;
    tracing::debug!(?config, "Configuration loaded");

    let mut server = QuizServer::new(config, Arc::new(LlmEngineFactory));
    let addr = server.try_bind().await?;
    eprintln!("vizquiz listening on http://{}", addr);

    server.run().await?;
    Ok(())
}
