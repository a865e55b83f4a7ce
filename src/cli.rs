use crate::model::{Provider, Severity};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Severity filter for finding listings.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Critical,
    High,
    Medium,
    Low,
}

impl SeverityFilter {
    /// `All` is the identity filter.
    pub fn as_severity(&self) -> Option<Severity> {
        match self {
            SeverityFilter::All => None,
            SeverityFilter::Critical => Some(Severity::Critical),
            SeverityFilter::High => Some(Severity::High),
            SeverityFilter::Medium => Some(Severity::Medium),
            SeverityFilter::Low => Some(Severity::Low),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cloudguard",
    version,
    about = "Cloud misconfiguration scan aggregation and CIS compliance scoring",
    long_about = "cloudguard starts cloud misconfiguration scans through a scanning backend, \
aggregates findings across the session, and requests downloadable compliance reports."
)]
pub struct Cli {
    /// Cloud provider to scan
    #[arg(short, long, value_enum)]
    pub provider: Option<Provider>,

    /// Scan types to run (repeatable; defaults to storage, networking, iam)
    #[arg(short = 't', long = "scan-type")]
    pub scan_types: Vec<String>,

    /// List known scans and findings instead of scanning
    #[arg(short, long)]
    pub list: bool,

    /// Generate a compliance report for a scan id
    #[arg(long, value_name = "SCAN_ID")]
    pub report: Option<String>,

    /// Show dashboard statistics
    #[arg(long)]
    pub stats: bool,

    /// Severity filter for finding listings
    #[arg(short, long, value_enum, default_value_t = SeverityFilter::All)]
    pub severity: SeverityFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the synthetic demo source, never the backend
    #[arg(long)]
    pub demo: bool,

    /// Substitute demo data when the backend is unreachable
    #[arg(long)]
    pub offline_fallback: bool,

    /// Backend API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
