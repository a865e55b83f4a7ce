//! HTTP scan source against the scanning backend.

use super::ScanSource;
use crate::error::{CloudGuardError, Result};
use crate::model::{DashboardStats, Provider, Scan, ScanRequest};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

/// Blocking client for the backend REST surface.
pub struct HttpScanSource {
    client: Client,
    base_url: String,
}

impl HttpScanSource {
    /// Build a client with the given request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CloudGuardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch one scan by id. `GET /scans/{id}`.
    pub fn get_scan(&self, scan_id: &str) -> Result<Scan> {
        let url = self.url(&format!("/scans/{scan_id}"));
        debug!(%url, "fetching scan");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CloudGuardError::unavailable(&url, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CloudGuardError::NotFound(scan_id.to_string()));
        }
        let response = response
            .error_for_status()
            .map_err(|e| CloudGuardError::unavailable(&url, e))?;

        response
            .json()
            .map_err(|e| CloudGuardError::unavailable(&url, e))
    }

    /// Fetch the backend's dashboard statistics. `GET /dashboard/stats`.
    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        let url = self.url("/dashboard/stats");
        debug!(%url, "fetching dashboard stats");

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CloudGuardError::unavailable(&url, e))?;

        response
            .json()
            .map_err(|e| CloudGuardError::unavailable(&url, e))
    }
}

impl ScanSource for HttpScanSource {
    fn list_scans(&self) -> Result<Vec<Scan>> {
        let url = self.url("/scans");
        debug!(%url, "listing scans");

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CloudGuardError::unavailable(&url, e))?;

        response
            .json()
            .map_err(|e| CloudGuardError::unavailable(&url, e))
    }

    fn start_scan(&self, provider: Provider, scan_types: &[String]) -> Result<Scan> {
        let url = self.url("/scan");
        let request = ScanRequest::new(provider, scan_types);
        info!(%provider, scan_types = ?request.scan_types, "starting scan");

        // Transport failure means the backend never saw the request; an
        // error status means it ran and refused. The two must stay distinct.
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| CloudGuardError::unavailable(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| status.to_string());
            return Err(CloudGuardError::ScanFailed {
                status: status.as_u16(),
                message,
            });
        }

        response.json().map_err(|e| CloudGuardError::ScanFailed {
            status: status.as_u16(),
            message: format!("invalid scan payload: {e}"),
        })
    }
}
