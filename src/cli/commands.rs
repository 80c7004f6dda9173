use clap::{Parser, Subcommand};
use genai::adapter::AdapterKind;
use std::path::PathBuf;

/// LLM-powered conference attendee lead classification
#[derive(Parser, Debug)]
#[command(
    name = "confsift",
    about = "Classify conference attendees into pharmaceutical/healthcare lead categories",
    version,
    long_about = "confsift reads a conference attendee report (CSV), dispatches attendees to an \
                  LLM in bounded concurrent batches, and writes one classification per attendee \
                  with per-record status. Batches that permanently fail are isolated into \
                  clearly-flagged fallback records instead of aborting the run."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify an attendee report",
        long_about = "Loads and cleans the attendee CSV, then classifies every attendee in \
                      concurrent batches.\n\n\
                      Examples:\n  \
                      confsift classify attendees.csv\n  \
                      confsift classify attendees.csv -o results.csv --json results.json\n  \
                      confsift classify attendees.csv --batch-size 5 --max-workers 4\n  \
                      confsift classify attendees.csv --backend ollama --model qwen2.5:7b"
    )]
    Classify(ClassifyArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(value_name = "FILE", help = "Attendee report CSV")]
    pub input: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write results as CSV to this path"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Write results as JSON to this path")]
    pub json: Option<PathBuf>,

    #[arg(
        short = 'b',
        long,
        value_name = "N",
        default_value = "3",
        help = "Attendees per batch (one LLM call per batch)"
    )]
    pub batch_size: usize,

    #[arg(
        short = 'w',
        long,
        value_name = "N",
        default_value = "3",
        help = "Maximum batches processed concurrently"
    )]
    pub max_workers: usize,

    #[arg(
        long,
        value_name = "N",
        default_value = "2",
        help = "Retries per batch after the initial attempt"
    )]
    pub max_retries: u32,

    #[arg(
        short = 'B',
        long,
        value_parser = parse_adapter_kind,
        default_value = "openai",
        help = "LLM provider (ollama, openai, anthropic, gemini, xai, groq)"
    )]
    pub backend: AdapterKind,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        default_value = "gpt-4o-mini",
        help = "Model name (provider-specific)"
    )]
    pub model: String,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "60",
        help = "Per-request timeout in seconds"
    )]
    pub timeout: u64,
}

fn parse_adapter_kind(s: &str) -> Result<AdapterKind, String> {
    AdapterKind::from_lower_str(&s.to_lowercase()).ok_or_else(|| {
        format!(
            "Invalid provider: {}. Valid options: ollama, openai, anthropic, gemini, xai, groq",
            s
        )
    })
}
