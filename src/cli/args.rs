//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::analysis::ModelSelector;
use crate::domain::config::RequestTimeout;

/// Clinical Analyst - multimodal clinical case analysis
#[derive(Parser, Debug)]
#[command(name = "clinical-analyst")]
#[command(version)]
#[command(about = "Multimodal clinical case analysis using Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    /// Patient history text
    #[arg(long, value_name = "TEXT", conflicts_with = "history_file")]
    pub history: Option<String>,

    /// Read the patient history from a file ('-' for stdin)
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Examination findings text
    #[arg(short = 'e', long, value_name = "TEXT", conflicts_with = "examination_file")]
    pub examination: Option<String>,

    /// Read the examination findings from a file ('-' for stdin)
    #[arg(long, value_name = "PATH")]
    pub examination_file: Option<PathBuf>,

    /// Attach a clinical image or PDF (repeatable, order is kept)
    #[arg(short = 'a', long = "attach", value_name = "PATH")]
    pub attachments: Vec<PathBuf>,

    /// Recorded audio clip to include (sent last)
    #[arg(long, value_name = "PATH")]
    pub audio: Option<PathBuf>,

    /// Model to use (e.g., gemini-2.5-flash, gemini-2.5-pro, custom)
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Endpoint URL for the 'custom' model
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout (e.g., 90s, 2m)
    #[arg(long, value_name = "TIME")]
    pub timeout: Option<String>,

    /// Log anonymized request metadata (counts and sizes only)
    #[arg(long)]
    pub telemetry: bool,

    /// Print the analysis as returned, without formatting
    #[arg(long)]
    pub raw: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create settings file with defaults
    Init,
    /// Set a setting
    Set {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
    },
    /// Get a setting
    Get {
        /// Setting key
        key: String,
    },
    /// Remove a setting
    Unset {
        /// Setting key
        key: String,
    },
    /// List all settings
    List,
    /// Show settings file path
    Path,
}

/// Parsed options for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub history: String,
    pub examination: String,
    pub attachments: Vec<PathBuf>,
    pub audio: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: ModelSelector,
    pub custom_endpoint: Option<String>,
    pub timeout: RequestTimeout,
    pub telemetry: bool,
    pub raw: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "model",
    "custom_endpoint",
    "telemetry",
    "request_timeout",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
