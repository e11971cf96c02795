use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "translang")]
#[command(about = "Translate text through Google, DeepL or an LLM backend.")]
#[command(version)]
pub struct Cli {
    /// Target language code (fr, de, ja, ...)
    #[arg(short = 't', long = "to")]
    pub target: Option<String>,

    /// Provider: google, deepl, chat, openai (overrides config)
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Translate every non-empty line of a file
    #[arg(short = 'b', long)]
    pub batch: Option<PathBuf>,

    /// Run batch items concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Worker count for --parallel (overrides config)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Don't use cached result
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Text to translate
    #[arg(num_args = 1..)]
    pub text: Vec<String>,
}
