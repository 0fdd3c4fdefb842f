use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scrub")]
#[command(about = "PII detection and annotation for screenshots", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect PII regions in an OCR word dump
    Detect(DetectArgs),

    /// Manage annotation templates
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Synthesize redaction annotations from detected regions
    Redact(RedactArgs),
}

#[derive(Args)]
pub struct DetectArgs {
    /// OCR word dump (JSON: {"words": [{"text", "bbox", "confidence"}]})
    #[arg(long)]
    pub words: PathBuf,

    /// Override the OCR timeout from config
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List available templates
    List {
        /// Read templates from a JSON file instead of the built-in set
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show a template's shape descriptors
    Show {
        /// Template id
        id: String,

        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Expand a template into concrete annotations for an image size
    Apply {
        /// Template id
        id: String,

        /// Image width in pixels
        #[arg(long)]
        width: f64,

        /// Image height in pixels
        #[arg(long)]
        height: f64,

        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct RedactArgs {
    /// Detected regions (JSON array of PiiRegion)
    #[arg(long)]
    pub regions: PathBuf,

    /// Indices of accepted regions, e.g. --select 0,2
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<usize>,

    /// Redaction style: blur, pixelate or blackbox (default from config)
    #[arg(long)]
    pub style: Option<String>,

    /// Manually drawn redactions to append (JSON array of annotations)
    #[arg(long)]
    pub manual: Option<PathBuf>,
}
