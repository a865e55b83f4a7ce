use crate::model::Scan;
use crate::reporter::Reporter;

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, scan: &Scan) -> String {
        serde_json::to_string_pretty(scan)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize scan: {}"}}"#, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Provider, Severity};
    use crate::test_utils::fixtures::make_scan;

    #[test]
    fn test_json_output_structure() {
        let reporter = JsonReporter::new();
        let scan = make_scan("scan_1", Provider::Aws, &[Severity::Critical]);
        let output = reporter.report(&scan);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["id"], "scan_1");
        assert_eq!(parsed["provider"], "aws");
        assert_eq!(parsed["critical_count"], 1);
        assert_eq!(parsed["findings"][0]["severity"], "critical");
    }

    #[test]
    #[allow(clippy::default_constructed_unit_structs)]
    fn test_json_default_trait() {
        let reporter = JsonReporter::default();
        let scan = make_scan("scan_1", Provider::Gcp, &[]);
        let output = reporter.report(&scan);
        assert!(output.contains("\"status\": \"completed\""));
    }
}
