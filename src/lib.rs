pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod report;
pub mod reporter;
pub mod scoring;
pub mod session;
pub mod source;

#[cfg(test)]
pub mod test_utils;

pub use cli::{Cli, OutputFormat, SeverityFilter};
pub use config::Config;
pub use error::{CloudGuardError, Result};
pub use model::{
    DashboardStats, Finding, FindingStatus, Provider, ProviderBreakdown, Scan, ScanRequest,
    Severity,
};
pub use report::{HttpReportRequester, ReportRequester, ReportSummary};
pub use reporter::{json::JsonReporter, terminal::TerminalReporter, Reporter};
pub use scoring::{compliance_score, PostureLevel};
pub use session::{ScanSession, SessionTotals, TaggedFinding};
pub use source::{
    DemoScanSource, FallbackScanSource, HttpScanSource, ScanSource, SourceMode, DEMO_ID_PREFIX,
};
