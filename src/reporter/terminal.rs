use crate::model::{DashboardStats, Finding, Provider, Scan, Severity};
use crate::report::ReportSummary;
use crate::reporter::Reporter;
use crate::scoring::{compliance_score, PostureLevel};
use crate::session::{ScanSession, TaggedFinding};
use crate::source::DEMO_ID_PREFIX;
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn severity_label(&self, severity: &Severity) -> colored::ColoredString {
        let label = format!("[{}]", severity);
        match severity {
            Severity::Critical => label.red().bold(),
            Severity::High => label.yellow().bold(),
            Severity::Medium => label.cyan(),
            Severity::Low => label.white(),
        }
    }

    fn posture_label(&self, level: &PostureLevel) -> colored::ColoredString {
        let label = level.as_str();
        match level {
            PostureLevel::Compliant => label.green().bold(),
            PostureLevel::AtRisk => label.yellow().bold(),
            PostureLevel::Failing => label.red().bold(),
        }
    }

    fn demo_marker(&self, scan_id: &str) -> String {
        if scan_id.starts_with(DEMO_ID_PREFIX) {
            format!(" {}", "[DEMO DATA]".bright_magenta().bold())
        } else {
            String::new()
        }
    }

    fn format_finding(&self, index: usize, finding: &Finding) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "  {}. {} {} {}\n",
            index,
            self.severity_label(&finding.severity),
            finding.rule_id.bold(),
            finding.rule_name
        ));
        output.push_str(&format!(
            "     Resource: {} ({})\n",
            finding.resource_id, finding.resource_type
        ));
        output.push_str(&format!("     {}\n", finding.description));
        if let Some(ref remediation) = finding.remediation {
            output.push_str(&format!("     Remediation: {}\n", remediation.dimmed()));
        }
        if self.verbose {
            output.push_str(&format!(
                "     Finding id: {}  Status: {}\n",
                finding.id.dimmed(),
                finding.status
            ));
        }
        output
    }

    /// Render the session listing: totals, scan history, filtered findings.
    pub fn report_session(&self, session: &ScanSession, findings: &[TaggedFinding]) -> String {
        let totals = session.totals();
        let score = session.compliance_score();
        let level = PostureLevel::from_score(score);

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Session overview".bold()));
        output.push_str(&format!("  Scans:             {}\n", totals.total_scans));
        output.push_str(&format!("  Findings:          {}\n", totals.total_findings));
        output.push_str(&format!(
            "  Critical findings: {}\n",
            if totals.critical_findings > 0 {
                totals.critical_findings.to_string().red().bold().to_string()
            } else {
                totals.critical_findings.to_string()
            }
        ));
        output.push_str(&format!(
            "  Compliance score:  {}% {}\n",
            score,
            self.posture_label(&level)
        ));

        if !session.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", "Scan history".bold()));
            for scan in session.scans() {
                output.push_str(&format!(
                    "  {} {} {} critical={} high={} medium={}{}\n",
                    scan.id.bold(),
                    scan.provider.display_name(),
                    scan.timestamp.dimmed(),
                    scan.critical_count,
                    scan.high_count,
                    scan.medium_count,
                    self.demo_marker(&scan.id)
                ));
            }
        }

        if findings.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", "No findings match the filter".green()));
        } else {
            output.push('\n');
            output.push_str(&format!("{}\n", "Findings".bold()));
            for (i, tagged) in findings.iter().enumerate() {
                output.push_str(&self.format_finding(i + 1, &tagged.finding));
                output.push_str(&format!(
                    "     From: {} ({})\n",
                    tagged.scan_id,
                    tagged.provider.display_name()
                ));
            }
        }

        output
    }

    /// Render dashboard statistics.
    pub fn report_stats(&self, stats: &DashboardStats) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Dashboard statistics".bold()));
        output.push_str(&format!("  Total scans:    {}\n", stats.total_scans));
        output.push_str(&format!("  Total findings: {}\n", stats.total_findings));
        output.push_str(&format!("{}\n", "By provider".bold()));
        for provider in Provider::all() {
            output.push_str(&format!(
                "  {:<6} {}\n",
                provider.display_name(),
                stats.providers.get(*provider)
            ));
        }
        output
    }

    /// Render a compliance report request outcome.
    pub fn report_summary(&self, summary: &ReportSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Compliance report generated".green().bold()));
        output.push_str(&format!("  Scan:           {}\n", summary.scan_id));
        output.push_str(&format!(
            "  CIS compliance: {:.1}%\n",
            summary.cis_compliance
        ));
        output.push_str(&format!("  Report file:    {}\n", summary.pdf_file));
        if let Some(ref message) = summary.message {
            output.push_str(&format!("  {}\n", message.dimmed()));
        }
        output
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, scan: &Scan) -> String {
        let score = compliance_score(scan.critical_count);
        let level = PostureLevel::from_score(score);

        let mut output = String::new();
        output.push_str(&format!(
            "{} {}{}\n",
            "Scan".bold(),
            scan.id.bold(),
            self.demo_marker(&scan.id)
        ));
        output.push_str(&format!(
            "  Provider:  {}\n",
            scan.provider.display_name()
        ));
        output.push_str(&format!("  Timestamp: {}\n", scan.timestamp));
        output.push_str(&format!("  Status:    {}\n", scan.status));
        output.push_str(&format!("  Findings:  {}\n", scan.findings.len()));

        if scan.critical_count > 0 {
            output.push_str(&format!(
                "    {} {}\n",
                self.severity_label(&Severity::Critical),
                scan.critical_count
            ));
        }
        if scan.high_count > 0 {
            output.push_str(&format!(
                "    {} {}\n",
                self.severity_label(&Severity::High),
                scan.high_count
            ));
        }
        if scan.medium_count > 0 {
            output.push_str(&format!(
                "    {} {}\n",
                self.severity_label(&Severity::Medium),
                scan.medium_count
            ));
        }

        output.push_str(&format!(
            "  Compliance score: {}% {}\n",
            score,
            self.posture_label(&level)
        ));

        if !scan.findings.is_empty() {
            output.push('\n');
            for (i, finding) in scan.findings.iter().enumerate() {
                output.push_str(&self.format_finding(i + 1, finding));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Provider;
    use crate::test_utils::fixtures::{make_scan, sample_session};

    #[test]
    fn test_scan_report_contains_core_fields() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(false);
        let scan = make_scan("scan_1", Provider::Aws, &[Severity::Critical, Severity::High]);
        let output = reporter.report(&scan);

        assert!(output.contains("scan_1"));
        assert!(output.contains("AWS"));
        assert!(output.contains("[CRITICAL] 1"));
        assert!(output.contains("[HIGH] 1"));
        assert!(output.contains("Compliance score: 90%"));
        assert!(output.contains("COMPLIANT"));
    }

    #[test]
    fn test_demo_scan_is_marked() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(false);
        let scan = make_scan("scan_demo_001", Provider::Aws, &[]);
        let output = reporter.report(&scan);
        assert!(output.contains("[DEMO DATA]"));

        let real = make_scan("scan_20260101_120000", Provider::Aws, &[]);
        assert!(!reporter.report(&real).contains("[DEMO DATA]"));
    }

    #[test]
    fn test_session_report_totals_and_history() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(false);
        let session = sample_session();
        let findings = session.all_findings();
        let output = reporter.report_session(&session, &findings);

        assert!(output.contains("Session overview"));
        assert!(output.contains("Scan history"));
        assert!(output.contains("Findings"));
        assert!(output.contains("From: "));
    }

    #[test]
    fn test_session_report_empty_filter_note() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(false);
        let session = sample_session();
        let output = reporter.report_session(&session, &[]);
        assert!(output.contains("No findings match the filter"));
    }

    #[test]
    fn test_stats_report_lists_all_providers() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(false);
        let session = sample_session();
        let output = reporter.report_stats(&session.dashboard_stats());

        assert!(output.contains("AWS"));
        assert!(output.contains("Azure"));
        assert!(output.contains("GCP"));
        assert!(output.contains("Total scans"));
    }

    #[test]
    fn test_report_summary_output() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(false);
        let summary = ReportSummary {
            scan_id: "scan_1".to_string(),
            cis_compliance: 85.0,
            pdf_file: "compliance_report_scan_1.pdf".to_string(),
            message: Some("Report generated successfully".to_string()),
        };
        let output = reporter.report_summary(&summary);

        assert!(output.contains("scan_1"));
        assert!(output.contains("85.0%"));
        assert!(output.contains("compliance_report_scan_1.pdf"));
    }

    #[test]
    fn test_verbose_includes_finding_ids() {
        colored::control::set_override(false);
        let reporter = TerminalReporter::new(true);
        let scan = make_scan("scan_1", Provider::Aws, &[Severity::Medium]);
        let output = reporter.report(&scan);
        assert!(output.contains("Finding id:"));
        assert!(output.contains("Status: open"));
    }
}
