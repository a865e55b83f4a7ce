//! Deterministic demo scan source.
//!
//! Keeps the tool exercisable with no backend. Every id carries
//! [`DEMO_ID_PREFIX`] so synthetic results are never mistaken for real
//! security data.

use super::ScanSource;
use crate::error::Result;
use crate::model::{Finding, FindingStatus, Provider, Scan, Severity};
use std::sync::atomic::{AtomicU64, Ordering};

/// Id prefix marking a scan as synthetic.
pub const DEMO_ID_PREFIX: &str = "scan_demo_";

/// Scan source returning fixed sample findings per provider.
#[derive(Debug)]
pub struct DemoScanSource {
    // scan_demo_001 is reserved for the baseline scan in list_scans.
    next_id: AtomicU64,
}

impl Default for DemoScanSource {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(2),
        }
    }
}

impl DemoScanSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_scan_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{DEMO_ID_PREFIX}{n:03}")
    }

    fn finding(
        id: &str,
        rule_id: &str,
        rule_name: &str,
        resource_type: &str,
        resource_id: &str,
        description: &str,
        severity: Severity,
        remediation: &str,
    ) -> Finding {
        Finding {
            id: id.to_string(),
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            description: description.to_string(),
            severity,
            status: FindingStatus::Open,
            remediation: Some(remediation.to_string()),
        }
    }

    fn sample_findings(provider: Provider) -> Vec<Finding> {
        match provider {
            Provider::Aws => vec![
                Self::finding(
                    "aws-s3-001",
                    "CIS-AWS-1.2",
                    "S3 Bucket Public Access",
                    "S3 Bucket",
                    "production-data-bucket",
                    "S3 bucket allows public read access",
                    Severity::Critical,
                    "Apply bucket policy to restrict public access",
                ),
                Self::finding(
                    "aws-sg-001",
                    "CIS-AWS-4.1",
                    "Overly Permissive Security Group",
                    "Security Group",
                    "sg-12345678",
                    "Security group allows SSH from 0.0.0.0/0",
                    Severity::High,
                    "Restrict SSH access to specific IP ranges",
                ),
            ],
            Provider::Azure => vec![Self::finding(
                "azure-storage-001",
                "CIS-Azure-3.1",
                "Storage Account Anonymous Access",
                "Storage Account",
                "storageprod123",
                "Storage account allows anonymous blob access",
                Severity::Critical,
                "Disallow anonymous access to storage containers",
            )],
            Provider::Gcp => vec![Self::finding(
                "gcp-bucket-001",
                "CIS-GCP-1.1",
                "Public Cloud Storage Bucket",
                "Cloud Storage",
                "gcp-prod-data",
                "Cloud Storage bucket is publicly accessible",
                Severity::Critical,
                "Update bucket IAM policies",
            )],
        }
    }

    /// The fixed baseline scan shown when no backend history exists.
    fn baseline_scan() -> Scan {
        let findings = vec![
            Self::finding(
                "finding_1",
                "CIS-AWS-1.2",
                "Public S3 Bucket Detected",
                "S3 Bucket",
                "production-data-bucket",
                "S3 bucket allows public read access which may expose sensitive data",
                Severity::Critical,
                "Apply bucket policy to restrict public access",
            ),
            Self::finding(
                "finding_2",
                "CIS-AWS-2.1",
                "Security Group Allows 0.0.0.0/0",
                "Security Group",
                "sg-0123456789",
                "Security group allows unrestricted access from any IP address",
                Severity::High,
                "Restrict ingress to known CIDR ranges",
            ),
            Self::finding(
                "finding_3",
                "CIS-AWS-3.5",
                "IAM Policy with Wildcard Permissions",
                "IAM Policy",
                "policy-admin-*",
                "IAM policy grants excessive permissions using wildcards",
                Severity::Medium,
                "Scope IAM actions and resources explicitly",
            ),
        ];
        Scan::new(format!("{DEMO_ID_PREFIX}001"), Provider::Aws, findings)
    }
}

impl ScanSource for DemoScanSource {
    fn list_scans(&self) -> Result<Vec<Scan>> {
        Ok(vec![Self::baseline_scan()])
    }

    fn start_scan(&self, provider: Provider, _scan_types: &[String]) -> Result<Scan> {
        Ok(Scan::new(
            self.next_scan_id(),
            provider,
            Self::sample_findings(provider),
        ))
    }
}
