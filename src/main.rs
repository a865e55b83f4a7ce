use clap::Parser;
use cloudguard::{
    handlers::{run_list_mode, run_report_mode, run_scan_mode, run_stats_mode},
    Cli,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "cloudguard=debug"
    } else {
        "cloudguard=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Handle --report <scan_id>
    if let Some(ref scan_id) = cli.report {
        return run_report_mode(&cli, scan_id);
    }

    // Handle --list
    if cli.list {
        return run_list_mode(&cli);
    }

    // Handle --stats
    if cli.stats {
        return run_stats_mode(&cli);
    }

    // Normal mode: start a scan
    run_scan_mode(&cli)
}
