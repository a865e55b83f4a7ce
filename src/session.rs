//! Session-level scan aggregation.
//!
//! A [`ScanSession`] owns the ordered list of scans accumulated during one
//! user session and derives every cross-scan view the presentation layer
//! needs: the flattened finding list, severity filters, totals, and the
//! dashboard provider breakdown. Scans are append-only; every read hands
//! back owned snapshots, so readers never observe partial updates.

use crate::error::{CloudGuardError, Result};
use crate::model::{DashboardStats, Finding, Provider, ProviderBreakdown, Scan, Severity};
use crate::scoring::compliance_score;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A finding tagged with its origin scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedFinding {
    #[serde(flatten)]
    pub finding: Finding,
    pub scan_id: String,
    pub provider: Provider,
}

/// Cross-scan totals for the session header.
///
/// `total_findings` sums the three per-scan counters, so low-severity
/// findings are not included; the wire contract carries no low counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    pub total_scans: usize,
    pub total_findings: usize,
    pub critical_findings: usize,
}

/// Holds the scans of one logical session, most recent first.
#[derive(Debug, Default)]
pub struct ScanSession {
    scans: Vec<Scan>,
    ids: HashSet<String>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from a batch of scans, e.g. a `GET /scans` response.
    ///
    /// The batch is ingested in reverse so the last scan of the batch ends
    /// up most recent, matching the backend's chronological ordering.
    pub fn from_scans(scans: Vec<Scan>) -> Result<Self> {
        let mut session = Self::new();
        for scan in scans.into_iter().rev() {
            session.add_scan(scan)?;
        }
        Ok(session)
    }

    /// Prepend a scan to the session.
    ///
    /// The severity counters are recomputed from the findings rather than
    /// trusted from the wire. Fails on a duplicate scan id and leaves the
    /// session unchanged.
    pub fn add_scan(&mut self, mut scan: Scan) -> Result<()> {
        if self.ids.contains(&scan.id) {
            return Err(CloudGuardError::duplicate_scan(&scan.id));
        }

        if !scan.counts_consistent() {
            debug!(
                scan_id = %scan.id,
                "severity counters disagreed with findings, recomputing"
            );
            scan.recount();
        }

        self.ids.insert(scan.id.clone());
        self.scans.insert(0, scan);
        Ok(())
    }

    /// Scans in session order (most recent first).
    pub fn scans(&self) -> &[Scan] {
        &self.scans
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    pub fn contains(&self, scan_id: &str) -> bool {
        self.ids.contains(scan_id)
    }

    pub fn get(&self, scan_id: &str) -> Option<&Scan> {
        self.scans.iter().find(|s| s.id == scan_id)
    }

    /// Every finding across the session, tagged with its origin scan id and
    /// provider. Scans in session order, findings in detection order.
    pub fn all_findings(&self) -> Vec<TaggedFinding> {
        self.scans
            .iter()
            .flat_map(|scan| {
                scan.findings.iter().map(|finding| TaggedFinding {
                    finding: finding.clone(),
                    scan_id: scan.id.clone(),
                    provider: scan.provider,
                })
            })
            .collect()
    }

    /// Findings matching the severity, in `all_findings` order.
    /// `None` is the identity filter.
    pub fn filter_by_severity(&self, severity: Option<Severity>) -> Vec<TaggedFinding> {
        match severity {
            None => self.all_findings(),
            Some(wanted) => self
                .all_findings()
                .into_iter()
                .filter(|tagged| tagged.finding.severity == wanted)
                .collect(),
        }
    }

    pub fn totals(&self) -> SessionTotals {
        SessionTotals {
            total_scans: self.scans.len(),
            total_findings: self.scans.iter().map(Scan::counted_findings).sum(),
            critical_findings: self.scans.iter().map(|s| s.critical_count).sum(),
        }
    }

    /// Session-wide compliance score; an empty session scores 100.
    pub fn compliance_score(&self) -> u32 {
        compliance_score(self.totals().critical_findings)
    }

    pub fn provider_counts(&self) -> ProviderBreakdown {
        let mut breakdown = ProviderBreakdown::default();
        for scan in &self.scans {
            breakdown.increment(scan.provider);
        }
        breakdown
    }

    /// Local rendition of the dashboard stats payload.
    ///
    /// Counts every finding the way the backend endpoint does, not just the
    /// counter-tracked ones.
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            total_scans: self.scans.len(),
            total_findings: self.scans.iter().map(|s| s.findings.len()).sum(),
            providers: self.provider_counts(),
        }
    }
}
