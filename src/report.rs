//! Compliance report requests.
//!
//! The backend materializes the report; this side only passes the scan id
//! through and surfaces the returned compliance percentage and file name.

use crate::error::{CloudGuardError, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Backend payload of `POST /scans/{id}/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub scan_id: String,
    pub cis_compliance: f64,
    pub pdf_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Requests report generation from the backing store.
pub trait ReportRequester {
    fn generate_report(&self, scan_id: &str) -> Result<ReportSummary>;
}

/// HTTP implementation against the backend report endpoint.
pub struct HttpReportRequester {
    client: Client,
    base_url: String,
}

impl HttpReportRequester {
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
}

impl ReportRequester for HttpReportRequester {
    fn generate_report(&self, scan_id: &str) -> Result<ReportSummary> {
        let url = format!("{}/scans/{}/report", self.base_url, scan_id);
        info!(%scan_id, "requesting compliance report");

        let response = self
            .client
            .post(&url)
            .send()
            .map_err(|e| CloudGuardError::unavailable(&url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CloudGuardError::NotFound(scan_id.to_string()));
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| status.to_string());
            return Err(CloudGuardError::Generation {
                scan_id: scan_id.to_string(),
                message,
            });
        }

        response
            .json()
            .map_err(|e| CloudGuardError::Generation {
                scan_id: scan_id.to_string(),
                message: format!("invalid report payload: {e}"),
            })
    }
}
