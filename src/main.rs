use anyhow::Result;
use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod formats;
mod model;
mod pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let cfg = config::Config::load(args.config.as_deref())?;
    config::init_tracing(&cfg.logging, args.log_level.as_deref())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wordcue starting");

    match args.command {
        cli::Command::Render(cmd) => pipeline::run_render(cmd, &cfg),
        cli::Command::Fetch(cmd) => pipeline::run_fetch(cmd, &cfg).await,
        cli::Command::PrintDefaultConfig => {
            let s = cfg.to_toml_pretty()?;
            print!("{s}");
            Ok(())
        }
    }
}
