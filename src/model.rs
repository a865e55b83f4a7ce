//! Wire-level data model shared with the scanning backend.
//!
//! Field names and enum spellings are the REST contract: they must match the
//! JSON emitted by `POST /scan` and `GET /scans` exactly.

use serde::{Deserialize, Serialize};

/// Scan types requested when none are given explicitly.
pub const DEFAULT_SCAN_TYPES: &[&str] = &["storage", "networking", "iam"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Lifecycle state of a single finding. Backends that predate the field
/// omit it, so deserialization defaults to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    #[default]
    Open,
    Resolved,
}

impl FindingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::Open => "open",
            FindingStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cloud platform a scan targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    pub fn all() -> &'static [Provider] {
        &[Provider::Aws, Provider::Azure, Provider::Gcp]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Azure => "Azure",
            Provider::Gcp => "GCP",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected misconfiguration instance. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub resource_type: String,
    pub resource_id: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub status: FindingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

fn default_scan_status() -> String {
    "completed".to_string()
}

/// One execution of the detection process against a provider.
///
/// The severity counters are derived from `findings`; see
/// [`Scan::recount`]. Consumers ingesting wire data recompute them instead
/// of trusting the serialized values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub id: String,
    pub provider: Provider,
    /// Creation instant, ISO-8601.
    pub timestamp: String,
    pub findings: Vec<Finding>,
    #[serde(default = "default_scan_status")]
    pub status: String,
    #[serde(default)]
    pub critical_count: usize,
    #[serde(default)]
    pub high_count: usize,
    #[serde(default)]
    pub medium_count: usize,
}

impl Scan {
    /// Create a completed scan stamped with the current time, deriving the
    /// severity counters from the findings.
    pub fn new(id: impl Into<String>, provider: Provider, findings: Vec<Finding>) -> Self {
        let mut scan = Self {
            id: id.into(),
            provider,
            timestamp: chrono::Utc::now().to_rfc3339(),
            findings,
            status: default_scan_status(),
            critical_count: 0,
            high_count: 0,
            medium_count: 0,
        };
        scan.recount();
        scan
    }

    /// Recompute the severity counters from the findings.
    ///
    /// There is no low counter on the wire; low findings only appear in the
    /// findings list itself.
    pub fn recount(&mut self) {
        let (critical, high, medium) =
            self.findings
                .iter()
                .fold((0, 0, 0), |(c, h, m), f| match f.severity {
                    Severity::Critical => (c + 1, h, m),
                    Severity::High => (c, h + 1, m),
                    Severity::Medium => (c, h, m + 1),
                    Severity::Low => (c, h, m),
                });
        self.critical_count = critical;
        self.high_count = high;
        self.medium_count = medium;
    }

    /// Whether the serialized counters agree with the findings.
    pub fn counts_consistent(&self) -> bool {
        let mut expected = self.clone();
        expected.recount();
        self.critical_count == expected.critical_count
            && self.high_count == expected.high_count
            && self.medium_count == expected.medium_count
    }

    /// Findings tracked by the counters (everything above low).
    pub fn counted_findings(&self) -> usize {
        self.critical_count + self.high_count + self.medium_count
    }
}

/// Request body for `POST /scan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub provider: Provider,
    pub scan_types: Vec<String>,
}

impl ScanRequest {
    pub fn new(provider: Provider, scan_types: &[String]) -> Self {
        let scan_types = if scan_types.is_empty() {
            DEFAULT_SCAN_TYPES.iter().map(|s| s.to_string()).collect()
        } else {
            scan_types.to_vec()
        };
        Self {
            provider,
            scan_types,
        }
    }
}

/// Per-provider scan counts in the dashboard stats payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderBreakdown {
    pub aws: usize,
    pub azure: usize,
    pub gcp: usize,
}

impl ProviderBreakdown {
    pub fn get(&self, provider: Provider) -> usize {
        match provider {
            Provider::Aws => self.aws,
            Provider::Azure => self.azure,
            Provider::Gcp => self.gcp,
        }
    }

    pub fn increment(&mut self, provider: Provider) {
        match provider {
            Provider::Aws => self.aws += 1,
            Provider::Azure => self.azure += 1,
            Provider::Gcp => self.gcp += 1,
        }
    }
}

/// Payload of `GET /dashboard/stats`.
///
/// The backend counts every finding here, unlike the session totals which
/// follow the three severity counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_scans: usize,
    pub total_findings: usize,
    pub providers: ProviderBreakdown,
}
