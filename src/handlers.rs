//! Command mode handlers.

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::model::DashboardStats;
use crate::report::{HttpReportRequester, ReportRequester};
use crate::reporter::{json::JsonReporter, terminal::TerminalReporter, Reporter};
use crate::session::{ScanSession, SessionTotals, TaggedFinding};
use crate::source::{build_source, HttpScanSource, SourceMode};
use serde::Serialize;
use std::fs;
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// JSON shape of the `--list` output.
#[derive(Debug, Serialize)]
struct SessionListing {
    totals: SessionTotals,
    compliance_score: u32,
    scans: Vec<crate::model::Scan>,
    findings: Vec<TaggedFinding>,
}

fn load_config(cli: &Cli) -> Config {
    let mut config = Config::load(std::env::current_dir().ok().as_deref());
    if let Some(ref url) = cli.api_url {
        config.api.base_url = url.clone();
    }
    config
}

fn resolve_mode(cli: &Cli, config: &Config) -> SourceMode {
    if cli.demo {
        SourceMode::Demo
    } else if cli.offline_fallback {
        SourceMode::Auto
    } else {
        config.source.mode
    }
}

/// Print the output or write it to `--output`. Returns false on a failed
/// file write.
fn write_output(cli: &Cli, output: &str) -> bool {
    if let Some(ref output_path) = cli.output {
        match fs::write(output_path, output) {
            Ok(()) => {
                println!("Output written to {}", output_path.display());
                true
            }
            Err(e) => {
                eprintln!("Failed to write output to {}: {}", output_path.display(), e);
                false
            }
        }
    } else {
        println!("{}", output);
        true
    }
}

/// Run a scan (the default mode).
pub fn run_scan_mode(cli: &Cli) -> ExitCode {
    let config = load_config(cli);
    let mode = resolve_mode(cli, &config);
    let provider = cli.provider.unwrap_or(config.scan.provider);
    let scan_types = if cli.scan_types.is_empty() {
        config.scan.scan_types.clone()
    } else {
        cli.scan_types.clone()
    };

    info!(%provider, ?mode, "starting scan");

    let source = match build_source(mode, &config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match source.start_scan(provider, &scan_types) {
        Ok(scan) => {
            let output = format_scan(cli, &scan);
            if !write_output(cli, &output) {
                return ExitCode::from(2);
            }

            debug!(
                scan_id = %scan.id,
                critical = scan.critical_count,
                high = scan.high_count,
                medium = scan.medium_count,
                "scan completed"
            );

            if scan.critical_count > 0 {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn format_scan(cli: &Cli, scan: &crate::model::Scan) -> String {
    match cli.format {
        OutputFormat::Terminal => TerminalReporter::new(cli.verbose).report(scan),
        OutputFormat::Json => JsonReporter::new().report(scan),
    }
}

/// Handle `--list`.
pub fn run_list_mode(cli: &Cli) -> ExitCode {
    let config = load_config(cli);
    let mode = resolve_mode(cli, &config);

    let session = match build_session(mode, &config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let findings = session.filter_by_severity(cli.severity.as_severity());

    let output = match cli.format {
        OutputFormat::Terminal => {
            TerminalReporter::new(cli.verbose).report_session(&session, &findings)
        }
        OutputFormat::Json => {
            let listing = SessionListing {
                totals: session.totals(),
                compliance_score: session.compliance_score(),
                scans: session.scans().to_vec(),
                findings,
            };
            serde_json::to_string_pretty(&listing)
                .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize listing: {}"}}"#, e))
        }
    };

    if write_output(cli, &output) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn build_session(mode: SourceMode, config: &Config) -> Result<ScanSession> {
    let source = build_source(mode, config)?;
    let scans = source.list_scans()?;
    ScanSession::from_scans(scans)
}

/// Handle `--report <scan_id>`.
pub fn run_report_mode(cli: &Cli, scan_id: &str) -> ExitCode {
    let config = load_config(cli);

    let requester = match HttpReportRequester::new(&config.api.base_url, config.api.timeout_secs) {
        Ok(requester) => requester,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match requester.generate_report(scan_id) {
        Ok(summary) => {
            info!(scan_id = %summary.scan_id, compliance = summary.cis_compliance, "report ready");
            let output = match cli.format {
                OutputFormat::Terminal => {
                    TerminalReporter::new(cli.verbose).report_summary(&summary)
                }
                OutputFormat::Json => serde_json::to_string_pretty(&summary).unwrap_or_else(|e| {
                    format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e)
                }),
            };
            if write_output(cli, &output) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Handle `--stats`.
pub fn run_stats_mode(cli: &Cli) -> ExitCode {
    let config = load_config(cli);
    let mode = resolve_mode(cli, &config);

    let stats = match fetch_stats(mode, &config) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let output = match cli.format {
        OutputFormat::Terminal => TerminalReporter::new(cli.verbose).report_stats(&stats),
        OutputFormat::Json => serde_json::to_string_pretty(&stats)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize stats: {}"}}"#, e)),
    };

    if write_output(cli, &output) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn fetch_stats(mode: SourceMode, config: &Config) -> Result<DashboardStats> {
    match mode {
        SourceMode::Demo => Ok(build_session(SourceMode::Demo, config)?.dashboard_stats()),
        SourceMode::Remote => {
            HttpScanSource::new(&config.api.base_url, config.api.timeout_secs)?.dashboard_stats()
        }
        SourceMode::Auto => {
            let http = HttpScanSource::new(&config.api.base_url, config.api.timeout_secs)?;
            match http.dashboard_stats() {
                Ok(stats) => Ok(stats),
                Err(err) if err.is_recoverable() => {
                    warn!(error = %err, "backend unavailable, computing stats from demo data");
                    Ok(build_session(SourceMode::Demo, config)?.dashboard_stats())
                }
                Err(err) => Err(err),
            }
        }
    }
}
