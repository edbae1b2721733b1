//! Ethos CLI - command-line interface for the case reasoning engine.

use clap::Parser;
use ethos_cli::{commands, Cli, CliFormat, Command, Formatter};
use ethos_pipeline::PipelineConfig;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_toml(&std::fs::read_to_string(path)?)?,
        None => PipelineConfig::default(),
    };

    let format = cli.format.unwrap_or(CliFormat::Table);
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        Command::Parse(args) => commands::execute_parse(args, &config, &formatter)?,
        Command::Retrieve(args) => commands::execute_retrieve(args, &cli.db, &config, &formatter)?,
        Command::Advise(args) => commands::execute_advise(args, &cli.db, config, &formatter).await?,
        Command::Seed => commands::execute_seed(&cli.db, &formatter)?,
    }

    Ok(())
}
