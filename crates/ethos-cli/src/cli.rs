//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Ethos CLI - structural case analysis, precedent retrieval, and validated
/// reasoning advice for professional-ethics narratives.
#[derive(Debug, Parser)]
#[command(name = "ethos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Knowledge base database path
    #[arg(short, long, global = true, default_value = "ethos.db")]
    pub db: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (identifiers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a case narrative into FIRAC sections
    Parse(ParseArgs),

    /// Rank concepts and precedents against a narrative's sections
    Retrieve(RetrieveArgs),

    /// Produce validated reasoning advice for a narrative
    Advise(AdviseArgs),

    /// Seed the knowledge base with a small demonstration ontology
    Seed,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Case narrative text; omit to read from --file
    pub narrative: Option<String>,

    /// Read the narrative from a file
    #[arg(short = 'i', long)]
    pub file: Option<String>,
}

/// Arguments for the retrieve command.
#[derive(Debug, Parser)]
pub struct RetrieveArgs {
    /// Case narrative text; omit to read from --file
    pub narrative: Option<String>,

    /// Read the narrative from a file
    #[arg(short = 'i', long)]
    pub file: Option<String>,

    /// Number of candidates to keep per section
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Anchor concept URIs for graph-distance tie-breaking
    #[arg(short, long)]
    pub anchor: Vec<String>,
}

/// Arguments for the advise command.
#[derive(Debug, Parser)]
pub struct AdviseArgs {
    /// Case narrative text; omit to read from --file
    pub narrative: Option<String>,

    /// Read the narrative from a file
    #[arg(short = 'i', long)]
    pub file: Option<String>,

    /// Use the deterministic mock generator instead of Ollama
    #[arg(long)]
    pub mock: bool,

    /// Ollama endpoint
    #[arg(long, default_value = ethos_llm::ollama::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Ollama model name
    #[arg(short, long, default_value = "llama3")]
    pub model: String,
}

impl ParseArgs {
    /// The narrative, from the positional argument or --file
    pub fn narrative(&self) -> crate::Result<String> {
        read_narrative(self.narrative.as_deref(), self.file.as_deref())
    }
}

impl RetrieveArgs {
    /// The narrative, from the positional argument or --file
    pub fn narrative(&self) -> crate::Result<String> {
        read_narrative(self.narrative.as_deref(), self.file.as_deref())
    }
}

impl AdviseArgs {
    /// The narrative, from the positional argument or --file
    pub fn narrative(&self) -> crate::Result<String> {
        read_narrative(self.narrative.as_deref(), self.file.as_deref())
    }
}

fn read_narrative(inline: Option<&str>, file: Option<&str>) -> crate::Result<String> {
    match (inline, file) {
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (Some(_), Some(_)) => Err(crate::CliError::InvalidArgument(
            "give the narrative inline or via --file, not both".to_string(),
        )),
        (None, None) => Err(crate::CliError::InvalidArgument(
            "a narrative is required, inline or via --file".to_string(),
        )),
    }
}
