//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use jas_probar::LocatorKind;
use std::path::PathBuf;

/// Jas-probador: run the JAS settings scenario against an Appium server
#[derive(Parser, Debug)]
#[command(name = "jas-probador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the settings scenario on a device
    Run(RunArgs),

    /// List the keys of a locator catalog
    Catalog(CatalogArgs),

    /// Resolve one catalog key to a concrete locator
    Resolve(ResolveArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// YAML scenario configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Appium server URL
    #[arg(long, env = "JAS_APPIUM_URL")]
    pub url: Option<String>,

    /// Locator catalog of the main screen
    #[arg(long)]
    pub main_catalog: Option<PathBuf>,

    /// Locator catalog of the settings screen
    #[arg(long)]
    pub settings_catalog: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the catalog command
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Catalog file
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Catalog file
    pub file: PathBuf,

    /// Mapping to look the key up in
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Symbolic key
    pub key: String,

    /// Template arguments, in order
    pub args: Vec<String>,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Log line format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Catalog mapping selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// XPath templates
    Xpath,
    /// Resource-id templates
    ResourceId,
}

impl From<KindArg> for LocatorKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Xpath => Self::Structural,
            KindArg::ResourceId => Self::Id,
        }
    }
}
