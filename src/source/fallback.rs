//! Demo substitution on backend unavailability.
//!
//! Only `Unavailable` errors are recovered; a reachable backend that
//! reports a failed scan surfaces that failure unchanged. Substitution is
//! logged, and the substituted scans keep their demo id prefix.

use super::demo::DemoScanSource;
use super::ScanSource;
use crate::error::Result;
use crate::model::{Provider, Scan};
use tracing::warn;

/// Wraps a primary source with a demo fallback.
pub struct FallbackScanSource {
    primary: Box<dyn ScanSource>,
    demo: DemoScanSource,
}

impl FallbackScanSource {
    pub fn new(primary: Box<dyn ScanSource>) -> Self {
        Self {
            primary,
            demo: DemoScanSource::new(),
        }
    }
}

impl ScanSource for FallbackScanSource {
    fn list_scans(&self) -> Result<Vec<Scan>> {
        match self.primary.list_scans() {
            Ok(scans) => Ok(scans),
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "backend unavailable, serving demo scan list");
                self.demo.list_scans()
            }
            Err(err) => Err(err),
        }
    }

    fn start_scan(&self, provider: Provider, scan_types: &[String]) -> Result<Scan> {
        match self.primary.start_scan(provider, scan_types) {
            Ok(scan) => Ok(scan),
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, %provider, "backend unavailable, substituting demo scan");
                self.demo.start_scan(provider, scan_types)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloudGuardError;
    use crate::source::DEMO_ID_PREFIX;

    struct FailingSource {
        recoverable: bool,
    }

    impl ScanSource for FailingSource {
        fn list_scans(&self) -> Result<Vec<Scan>> {
            Err(self.error())
        }

        fn start_scan(&self, _provider: Provider, _scan_types: &[String]) -> Result<Scan> {
            Err(self.error())
        }
    }

    impl FailingSource {
        fn error(&self) -> CloudGuardError {
            if self.recoverable {
                CloudGuardError::Unavailable {
                    url: "http://backend".to_string(),
                    source: "connection refused".into(),
                }
            } else {
                CloudGuardError::ScanFailed {
                    status: 500,
                    message: "scan worker crashed".to_string(),
                }
            }
        }
    }

    struct HealthySource;

    impl ScanSource for HealthySource {
        fn list_scans(&self) -> Result<Vec<Scan>> {
            Ok(vec![Scan::new("scan_real_1", Provider::Aws, vec![])])
        }

        fn start_scan(&self, provider: Provider, _scan_types: &[String]) -> Result<Scan> {
            Ok(Scan::new("scan_real_2", provider, vec![]))
        }
    }

    #[test]
    fn test_healthy_primary_passes_through() {
        let source = FallbackScanSource::new(Box::new(HealthySource));
        let scans = source.list_scans().unwrap();
        assert_eq!(scans[0].id, "scan_real_1");

        let scan = source.start_scan(Provider::Gcp, &[]).unwrap();
        assert_eq!(scan.id, "scan_real_2");
        assert!(!scan.id.starts_with(DEMO_ID_PREFIX));
    }

    #[test]
    fn test_unavailable_substitutes_demo_scan() {
        let source = FallbackScanSource::new(Box::new(FailingSource { recoverable: true }));

        let scan = source.start_scan(Provider::Azure, &[]).unwrap();
        assert!(scan.id.starts_with(DEMO_ID_PREFIX));
        assert_eq!(scan.provider, Provider::Azure);

        let scans = source.list_scans().unwrap();
        assert!(scans.iter().all(|s| s.id.starts_with(DEMO_ID_PREFIX)));
    }

    #[test]
    fn test_scan_failed_is_never_substituted() {
        let source = FallbackScanSource::new(Box::new(FailingSource { recoverable: false }));

        let err = source.start_scan(Provider::Aws, &[]).unwrap_err();
        assert!(matches!(err, CloudGuardError::ScanFailed { .. }));

        let err = source.list_scans().unwrap_err();
        assert!(matches!(err, CloudGuardError::ScanFailed { .. }));
    }
}
