//! Scan sources.
//!
//! A [`ScanSource`] produces [`Scan`]s, either by calling the scanning
//! backend over HTTP or by synthesizing deterministic demo data. The
//! fallback wrapper composes the two: real scans when the backend answers,
//! clearly-marked demo scans when it is unreachable and the caller opted in.

pub mod demo;
pub mod fallback;
pub mod http;

pub use demo::{DemoScanSource, DEMO_ID_PREFIX};
pub use fallback::FallbackScanSource;
pub use http::HttpScanSource;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Provider, Scan};
use serde::{Deserialize, Serialize};

/// Produces scans for the session. Implementations must keep transport
/// failures (`Unavailable`) distinct from backend-side scan failures
/// (`ScanFailed`) so callers can decide whether a fallback applies.
pub trait ScanSource {
    /// Fetch every scan known to the source.
    fn list_scans(&self) -> Result<Vec<Scan>>;

    /// Run a scan against the provider and return the completed result.
    fn start_scan(&self, provider: Provider, scan_types: &[String]) -> Result<Scan>;
}

/// Which scan source strategy the session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Backend only; unavailability is surfaced to the caller.
    #[default]
    Remote,
    /// Synthetic data only, never touches the network.
    Demo,
    /// Backend with demo substitution when the backend is unreachable.
    Auto,
}

/// Build the configured source strategy.
pub fn build_source(mode: SourceMode, config: &Config) -> Result<Box<dyn ScanSource>> {
    match mode {
        SourceMode::Remote => Ok(Box::new(HttpScanSource::new(
            &config.api.base_url,
            config.api.timeout_secs,
        )?)),
        SourceMode::Demo => Ok(Box::new(DemoScanSource::new())),
        SourceMode::Auto => {
            let primary = HttpScanSource::new(&config.api.base_url, config.api.timeout_secs)?;
            Ok(Box::new(FallbackScanSource::new(Box::new(primary))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_mode_default_is_remote() {
        assert_eq!(SourceMode::default(), SourceMode::Remote);
    }

    #[test]
    fn test_source_mode_serde_spelling() {
        assert_eq!(serde_json::to_string(&SourceMode::Auto).unwrap(), "\"auto\"");
        let mode: SourceMode = serde_json::from_str("\"demo\"").unwrap();
        assert_eq!(mode, SourceMode::Demo);
    }

    #[test]
    fn test_build_source_demo_mode() {
        let config = Config::default();
        let source = build_source(SourceMode::Demo, &config).unwrap();
        let scans = source.list_scans().unwrap();
        assert!(!scans.is_empty());
    }

    #[test]
    fn test_build_source_remote_mode() {
        let config = Config::default();
        assert!(build_source(SourceMode::Remote, &config).is_ok());
        assert!(build_source(SourceMode::Auto, &config).is_ok());
    }
}
