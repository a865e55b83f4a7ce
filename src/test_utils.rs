#[cfg(test)]
pub mod fixtures {
    use crate::model::{Finding, FindingStatus, Provider, Scan, Severity};
    use crate::session::ScanSession;

    pub fn make_finding(id: &str, severity: Severity) -> Finding {
        Finding {
            id: id.to_string(),
            rule_id: "CIS-AWS-1.2".to_string(),
            rule_name: "S3 Bucket Public Access".to_string(),
            resource_type: "S3 Bucket".to_string(),
            resource_id: "production-data-bucket".to_string(),
            description: "S3 bucket allows public read access".to_string(),
            severity,
            status: FindingStatus::Open,
            remediation: None,
        }
    }

    pub fn make_scan(id: &str, provider: Provider, severities: &[Severity]) -> Scan {
        let findings = severities
            .iter()
            .enumerate()
            .map(|(i, severity)| make_finding(&format!("{id}-f{i}"), *severity))
            .collect();
        Scan::new(id, provider, findings)
    }

    pub fn sample_session() -> ScanSession {
        let mut session = ScanSession::new();
        session
            .add_scan(make_scan(
                "scan_20260101_120000",
                Provider::Aws,
                &[Severity::Critical, Severity::High, Severity::Medium],
            ))
            .unwrap();
        session
            .add_scan(make_scan(
                "scan_20260102_093000",
                Provider::Azure,
                &[Severity::High],
            ))
            .unwrap();
        session
    }
}
