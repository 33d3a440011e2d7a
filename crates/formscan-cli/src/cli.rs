use clap::{Parser, Subcommand};
use formscan_extract::ExportFormat;
use std::path::PathBuf;

/// FormScan - Template-driven field extraction for scanned documents
#[derive(Parser, Debug)]
#[command(name = "formscan")]
#[command(about = "Template-driven field extraction for scanned documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./formscan.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// URL of the FormScan API server
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Minimum share of a field an OCR region must cover, in (0, 1]
    #[arg(long, global = true, value_name = "RATIO")]
    pub min_overlap: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a template to an OCR result
    Extract(ExtractArgs),

    /// Validate and manage templates
    Template(TemplateArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Template JSON file, or the id of a template stored on the server
    #[arg(long, short = 't', value_name = "FILE|ID")]
    pub template: String,

    /// OCR result JSON file
    #[arg(long, value_name = "FILE")]
    pub ocr: PathBuf,

    /// Output format (json, csv, text)
    #[arg(long, short = 'f', default_value = "json")]
    pub format: ExportFormat,

    /// OCR page number to read (defaults to the lowest page number)
    #[arg(long)]
    pub page: Option<u32>,

    /// Compute fields in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write the export to a file instead of stdout; the format's extension
    /// is added when the path has none
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// Check a template file without storing it
    Validate {
        /// Template JSON file
        file: PathBuf,
    },

    /// Upload a template file to the server
    Create {
        /// Template JSON file
        file: PathBuf,
    },

    /// List templates stored on the server
    List,

    /// Show one stored template
    Show {
        /// Template ID
        id: String,
    },

    /// Delete a stored template
    Delete {
        /// Template ID
        id: String,
    },
}
